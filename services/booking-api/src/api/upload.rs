use std::collections::HashMap;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use common::errors::AppError;

pub const TEMP_UPLOAD_PREFIX: &str = ".upload-";

/// A file streamed to local disk by the intake layer. The handler consuming
/// it must unlink the path after a successful remote upload; until then the
/// file stays on disk.
pub struct TempUpload {
    pub path: PathBuf,
    pub file_name: String,
}

/// Text fields and temp files collected from one multipart request. Files
/// keep their field order.
pub struct MultipartIntake {
    pub fields: HashMap<String, String>,
    pub files: Vec<TempUpload>,
}

pub async fn receive(
    mut payload: Multipart,
    upload_dir: &Path,
    max_files: usize,
) -> Result<MultipartIntake, AppError> {
    let mut fields = HashMap::new();
    let mut files: Vec<TempUpload> = Vec::new();

    while let Some(mut field) = payload.try_next().await.map_err(stream_error)? {
        let Some(disposition) = field.content_disposition() else {
            continue;
        };
        let Some(name) = disposition.get_name().map(str::to_owned) else {
            continue;
        };

        match disposition.get_filename().map(str::to_owned) {
            Some(file_name) => {
                if files.len() == max_files {
                    return Err(AppError::Validation("Too many files uploaded".to_string()));
                }

                let path = temp_path(upload_dir, &file_name);
                let mut file = tokio::fs::File::create(&path).await.map_err(io_error)?;
                while let Some(chunk) = field.try_next().await.map_err(stream_error)? {
                    file.write_all(&chunk).await.map_err(io_error)?;
                }

                files.push(TempUpload { path, file_name });
            }
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.try_next().await.map_err(stream_error)? {
                    value.extend_from_slice(&chunk);
                }
                fields.insert(name, String::from_utf8_lossy(&value).into_owned());
            }
        }
    }

    Ok(MultipartIntake { fields, files })
}

fn temp_path(upload_dir: &Path, original_name: &str) -> PathBuf {
    let file_name = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(extension) => format!("{}{}.{}", TEMP_UPLOAD_PREFIX, Uuid::new_v4(), extension),
        None => format!("{}{}", TEMP_UPLOAD_PREFIX, Uuid::new_v4()),
    };
    upload_dir.join(file_name)
}

fn stream_error(e: actix_multipart::MultipartError) -> AppError {
    tracing::error!("Multipart read error: {}", e);
    AppError::Internal
}

fn io_error(e: std::io::Error) -> AppError {
    tracing::error!("Temp file write error: {}", e);
    AppError::Internal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_keeps_the_original_extension() {
        let path = temp_path(Path::new("/tmp/uploads"), "ocean-view.JPG");

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(TEMP_UPLOAD_PREFIX));
        assert!(name.ends_with(".JPG"));
    }

    #[test]
    fn temp_path_copes_with_extensionless_names() {
        let path = temp_path(Path::new("/tmp/uploads"), "snapshot");

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(TEMP_UPLOAD_PREFIX));
        // only the dot of the hidden-file prefix
        assert_eq!(name.matches('.').count(), 1);
    }

    #[test]
    fn temp_paths_are_unique_per_call() {
        let a = temp_path(Path::new("/tmp/uploads"), "a.png");
        let b = temp_path(Path::new("/tmp/uploads"), "a.png");

        assert_ne!(a, b);
    }
}
