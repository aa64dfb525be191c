use common::errors::AppError;

use crate::domain::{Category, CategoryWithRooms};
use crate::repo::{CategoryRepository, RoomRepository};

use super::db_error;

#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    room_repo: RoomRepository,
}

impl CategoryService {
    pub fn new(category_repo: CategoryRepository, room_repo: RoomRepository) -> Self {
        Self {
            category_repo,
            room_repo,
        }
    }

    pub async fn create(&self, name: &str, amenities: Vec<String>) -> Result<Category, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }

        let category = Category::new(name.to_string(), amenities);
        self.category_repo.create(&category).await.map_err(db_error)?;

        Ok(category)
    }

    /// All categories with their room id lists resolved to room documents,
    /// in id-list order.
    pub async fn list_with_rooms(&self) -> Result<Vec<CategoryWithRooms>, AppError> {
        let categories = self.category_repo.list_all().await.map_err(db_error)?;

        let mut listed = Vec::with_capacity(categories.len());
        for category in categories {
            let rooms = self
                .room_repo
                .find_by_category(&category.id)
                .await
                .map_err(db_error)?;
            let rooms_by_id = rooms.into_iter().map(|room| (room.id.clone(), room)).collect();
            listed.push(CategoryWithRooms::resolve(category, rooms_by_id));
        }

        Ok(listed)
    }
}
