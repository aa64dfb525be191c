use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::room::Room;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub amenities: Json<Vec<String>>,
    /// Ordered back-references to the rooms created under this category.
    pub rooms: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, amenities: Vec<String>) -> Self {
        let now = common::time::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            amenities: Json(amenities),
            rooms: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing projection with the room id list resolved to room documents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithRooms {
    pub id: String,
    pub name: String,
    pub amenities: Vec<String>,
    pub rooms: Vec<Room>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryWithRooms {
    /// Resolves the category's ordered room id list against the rooms fetched
    /// for it. Ids without a matching room are skipped.
    pub fn resolve(category: Category, mut rooms_by_id: std::collections::HashMap<String, Room>) -> Self {
        let rooms = category
            .rooms
            .0
            .iter()
            .filter_map(|id| rooms_by_id.remove(id))
            .collect();

        Self {
            id: category.id,
            name: category.name,
            amenities: category.amenities.0,
            rooms,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
