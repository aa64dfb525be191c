use std::sync::Arc;

use common::errors::AppError;

use crate::api::upload::TempUpload;
use crate::clients::MediaStore;
use crate::domain::{Room, RoomImage};
use crate::repo::{CategoryRepository, RoomRepository};

use super::db_error;

pub struct CreateRoomInput {
    pub room_name: String,
    pub room_number: String,
    pub description: String,
    pub price: f64,
}

#[derive(Clone)]
pub struct RoomService {
    room_repo: RoomRepository,
    category_repo: CategoryRepository,
    media: Arc<dyn MediaStore>,
}

impl RoomService {
    pub fn new(
        room_repo: RoomRepository,
        category_repo: CategoryRepository,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            room_repo,
            category_repo,
            media,
        }
    }

    /// Creates a room under `category_id`. Uploads run strictly in input
    /// order; the room is persisted before the category back-reference, with
    /// no surrounding transaction.
    pub async fn create_room(
        &self,
        category_id: &str,
        input: CreateRoomInput,
        files: Vec<TempUpload>,
    ) -> Result<Room, AppError> {
        let mut category = self
            .category_repo
            .find_by_id(category_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let images = upload_all(self.media.as_ref(), &files).await?;

        let room = Room::new(
            category.id.clone(),
            input.room_name,
            input.room_number,
            input.description,
            input.price,
            images,
        );

        self.room_repo.create(&room).await.map_err(db_error)?;

        category.rooms.0.push(room.id.clone());
        self.category_repo
            .update_rooms(&category.id, &category.rooms.0, common::time::now())
            .await
            .map_err(db_error)?;

        Ok(room)
    }

    pub async fn delete_image(&self, room_id: &str, image_id: &str) -> Result<Room, AppError> {
        let mut room = self
            .room_repo
            .find_by_id(room_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Room Not Found".to_string()))?;

        let position = room
            .image_position(image_id)
            .ok_or_else(|| AppError::NotFound("Image Not Found in this Room".to_string()))?;

        // Remote delete first; if it fails the persisted list stays as it was.
        self.media.delete(image_id).await.map_err(external_error)?;

        room.remove_image(position);
        room.updated_at = common::time::now();
        self.room_repo
            .update_images(&room.id, &room.images.0, room.updated_at)
            .await
            .map_err(db_error)?;

        Ok(room)
    }

    pub async fn replace_image(
        &self,
        room_id: &str,
        image_id: &str,
        file: TempUpload,
    ) -> Result<Room, AppError> {
        let mut room = self
            .room_repo
            .find_by_id(room_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        let position = room
            .image_position(image_id)
            .ok_or_else(|| AppError::NotFound("Image not found in room".to_string()))?;

        let uploaded = self.media.upload(&file.path).await.map_err(external_error)?;
        remove_temp_file(&file)?;

        // Evict the old object only once the new one is confirmed uploaded.
        self.media.delete(image_id).await.map_err(external_error)?;

        room.replace_image(
            position,
            RoomImage {
                image_url: uploaded.url,
                image_id: uploaded.id,
            },
        );
        room.updated_at = common::time::now();
        self.room_repo
            .update_images(&room.id, &room.images.0, room.updated_at)
            .await
            .map_err(db_error)?;

        Ok(room)
    }
}

/// Uploads `files` to the media store one after the other, unlinking each
/// temp file once its upload succeeds. On any failure the already-uploaded
/// remote objects are deleted best-effort and the whole operation fails.
async fn upload_all(media: &dyn MediaStore, files: &[TempUpload]) -> Result<Vec<RoomImage>, AppError> {
    let mut images: Vec<RoomImage> = Vec::with_capacity(files.len());

    for file in files {
        let uploaded = match media.upload(&file.path).await {
            Ok(uploaded) => uploaded,
            Err(e) => {
                tracing::error!("Media upload failed for {}: {}", file.file_name, e);
                compensate(media, &images).await;
                return Err(AppError::ExternalService(e.to_string()));
            }
        };

        images.push(RoomImage {
            image_url: uploaded.url,
            image_id: uploaded.id,
        });

        if let Err(e) = remove_temp_file(file) {
            compensate(media, &images).await;
            return Err(e);
        }
    }

    Ok(images)
}

/// Best-effort removal of remote objects left behind by an aborted create.
async fn compensate(media: &dyn MediaStore, images: &[RoomImage]) {
    for image in images {
        if let Err(e) = media.delete(&image.image_id).await {
            tracing::error!(
                "Compensation failed, remote object {} leaked: {}",
                image.image_id,
                e
            );
        }
    }
}

fn remove_temp_file(file: &TempUpload) -> Result<(), AppError> {
    std::fs::remove_file(&file.path).map_err(|e| {
        tracing::error!("Failed to remove temp file {}: {}", file.path.display(), e);
        AppError::Internal
    })
}

fn external_error(e: anyhow::Error) -> AppError {
    tracing::error!("Media store error: {}", e);
    AppError::ExternalService(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UploadedMedia;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMediaStore {
        uploads: Mutex<Vec<PathBuf>>,
        deletes: Mutex<Vec<String>>,
        fail_on_upload: Option<usize>,
    }

    #[async_trait]
    impl MediaStore for FakeMediaStore {
        async fn upload(&self, path: &Path) -> anyhow::Result<UploadedMedia> {
            let mut uploads = self.uploads.lock().unwrap();
            if Some(uploads.len()) == self.fail_on_upload {
                anyhow::bail!("upload refused");
            }
            uploads.push(path.to_path_buf());
            let n = uploads.len();
            Ok(UploadedMedia {
                url: format!("https://media.example.com/{}.jpg", n),
                id: format!("media-{}", n),
            })
        }

        async fn delete(&self, media_id: &str) -> anyhow::Result<()> {
            self.deletes.lock().unwrap().push(media_id.to_string());
            Ok(())
        }
    }

    fn temp_files(n: usize) -> Vec<TempUpload> {
        (0..n)
            .map(|i| {
                let path = std::env::temp_dir()
                    .join(format!("room-upload-test-{}-{}", uuid::Uuid::new_v4(), i));
                std::fs::write(&path, b"fake image bytes").unwrap();
                TempUpload {
                    path,
                    file_name: format!("photo-{}.jpg", i),
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn uploads_sequentially_and_preserves_input_order() {
        let media = FakeMediaStore::default();
        let files = temp_files(3);
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();

        let images = upload_all(&media, &files).await.unwrap();

        let ids: Vec<&str> = images.iter().map(|i| i.image_id.as_str()).collect();
        assert_eq!(ids, vec!["media-1", "media-2", "media-3"]);
        assert_eq!(*media.uploads.lock().unwrap(), paths);
        assert!(media.deletes.lock().unwrap().is_empty());
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[tokio::test]
    async fn aborts_on_first_failure_and_compensates_uploaded_objects() {
        let media = FakeMediaStore {
            fail_on_upload: Some(2),
            ..Default::default()
        };
        let files = temp_files(4);

        let err = upload_all(&media, &files).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));

        assert_eq!(media.uploads.lock().unwrap().len(), 2);
        assert_eq!(*media.deletes.lock().unwrap(), vec!["media-1", "media-2"]);
        // the failing file and the ones after it keep their temp files
        assert!(files[2].path.exists());
        assert!(files[3].path.exists());
        for file in &files[2..] {
            let _ = std::fs::remove_file(&file.path);
        }
    }

    #[tokio::test]
    async fn zero_files_yield_an_empty_image_list() {
        let media = FakeMediaStore::default();

        let images = upload_all(&media, &[]).await.unwrap();

        assert!(images.is_empty());
        assert!(media.uploads.lock().unwrap().is_empty());
    }
}
