use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Reference to an object held by the external media store. The wire and
/// storage shape `{imageUrl, imageId}` is stable; `imageId` is the only key
/// used for later replace/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomImage {
    pub image_url: String,
    pub image_id: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub category: String,
    pub room_name: String,
    pub room_number: String,
    pub description: String,
    pub price: f64,
    pub images: Json<Vec<RoomImage>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        category: String,
        room_name: String,
        room_number: String,
        description: String,
        price: f64,
        images: Vec<RoomImage>,
    ) -> Self {
        let now = common::time::now();
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            room_name,
            room_number,
            description,
            price,
            images: Json(images),
            created_at: now,
            updated_at: now,
        }
    }

    /// Position of the image whose `imageId` matches exactly, if any.
    pub fn image_position(&self, image_id: &str) -> Option<usize> {
        self.images.0.iter().position(|img| img.image_id == image_id)
    }

    /// Removes the image at `position`, keeping the relative order of the
    /// remaining entries.
    pub fn remove_image(&mut self, position: usize) -> RoomImage {
        self.images.0.remove(position)
    }

    /// Overwrites the image at `position` in place, preserving its slot in
    /// the sequence.
    pub fn replace_image(&mut self, position: usize, image: RoomImage) {
        self.images.0[position] = image;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(n: u32) -> RoomImage {
        RoomImage {
            image_url: format!("https://media.example.com/room-{}.jpg", n),
            image_id: format!("media-{}", n),
        }
    }

    fn room_with_images(images: Vec<RoomImage>) -> Room {
        Room::new(
            "cat-1".to_string(),
            "Deluxe".to_string(),
            "101A".to_string(),
            "x".to_string(),
            150.0,
            images,
        )
    }

    #[test]
    fn image_position_matches_exact_id_only() {
        let room = room_with_images(vec![image(1), image(2), image(3)]);

        assert_eq!(room.image_position("media-2"), Some(1));
        assert_eq!(room.image_position("media-"), None);
        assert_eq!(room.image_position("media-4"), None);
    }

    #[test]
    fn remove_image_preserves_order_of_remaining_entries() {
        let mut room = room_with_images(vec![image(1), image(2), image(3), image(4)]);

        let removed = room.remove_image(1);

        assert_eq!(removed.image_id, "media-2");
        let ids: Vec<&str> = room.images.0.iter().map(|i| i.image_id.as_str()).collect();
        assert_eq!(ids, vec!["media-1", "media-3", "media-4"]);
        assert_eq!(room.image_position("media-2"), None);
    }

    #[test]
    fn replace_image_keeps_the_array_position() {
        let mut room = room_with_images(vec![image(1), image(2), image(3)]);

        room.replace_image(
            1,
            RoomImage {
                image_url: "https://media.example.com/fresh.jpg".to_string(),
                image_id: "media-9".to_string(),
            },
        );

        assert_eq!(room.image_position("media-9"), Some(1));
        assert_eq!(room.image_position("media-2"), None);
        assert_eq!(room.images.0.len(), 3);
    }

    #[test]
    fn wire_shape_uses_image_url_and_image_id_keys() {
        let serialized = serde_json::to_value(image(1)).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({
                "imageUrl": "https://media.example.com/room-1.jpg",
                "imageId": "media-1"
            })
        );
    }
}
