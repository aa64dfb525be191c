use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::domain::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: MySqlPool,
}

impl CategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, category: &Category) -> Result<()> {
        sqlx::query(
            "INSERT INTO categories (id, name, amenities, rooms, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.amenities.clone())
        .bind(category.rooms.clone())
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, amenities, rooms, created_at, updated_at
             FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, amenities, rooms, created_at, updated_at
             FROM categories ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn update_rooms(
        &self,
        id: &str,
        rooms: &[String],
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE categories SET rooms = ?, updated_at = ? WHERE id = ?")
            .bind(Json(rooms.to_vec()))
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
