use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::domain::{Room, RoomImage};

const ROOM_COLUMNS: &str =
    "id, category, room_name, room_number, description, price, images, created_at, updated_at";

#[derive(Clone)]
pub struct RoomRepository {
    pool: MySqlPool,
}

impl RoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, room: &Room) -> Result<()> {
        sqlx::query(
            "INSERT INTO rooms (id, category, room_name, room_number, description, price, images, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&room.id)
        .bind(&room.category)
        .bind(&room.room_name)
        .bind(&room.room_number)
        .bind(&room.description)
        .bind(room.price)
        .bind(room.images.clone())
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {} FROM rooms WHERE id = ?",
            ROOM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    pub async fn find_by_category(&self, category_id: &str) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {} FROM rooms WHERE category = ?",
            ROOM_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    pub async fn update_images(
        &self,
        id: &str,
        images: &[RoomImage],
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE rooms SET images = ?, updated_at = ? WHERE id = ?")
            .bind(Json(images.to_vec()))
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
