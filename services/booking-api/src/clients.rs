// Media store API client
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Remote `(url, id)` pair the media store assigns to every upload. The id is
/// the sole key for later replace/delete calls.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
    pub id: String,
}

/// External host holding binary image data. Implementations must report a
/// failed call as an error; callers decide what to roll back.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia>;
    async fn delete(&self, media_id: &str) -> Result<()>;
}

pub struct HttpMediaStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpMediaStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/media", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Media store error: {}", error_text));
        }

        let uploaded = response.json::<UploadedMedia>().await?;
        Ok(uploaded)
    }

    async fn delete(&self, media_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/v1/media/{}", self.base_url, media_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Media store error: {}", error_text));
        }

        Ok(())
    }
}
