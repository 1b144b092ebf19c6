//! Object storage for car photos.

use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

/// Bucket holding every car photo.
pub const CAR_IMAGES_BUCKET: &str = "car-images";

/// HTTP client for the `/storage/v1` object endpoints.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base: Url,
    key: String,
}

impl StorageClient {
    pub fn new(base_url: &str, key: &str) -> Result<Self> {
        let base = Url::parse(base_url)?.join("storage/v1/")?;
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base,
            key: key.to_string(),
        })
    }

    /// Object key for an upload: the car's folder plus a millisecond
    /// timestamp filename, e.g. `1b4e.../1714399024000.jpg`.
    pub fn object_key(car_id: Uuid, timestamp_millis: i64, extension: &str) -> String {
        format!("{car_id}/{timestamp_millis}.{extension}")
    }

    /// Upload object bytes under `bucket/path`.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.base.join(&format!("object/{bucket}/{path}"))?;
        let response = self
            .http
            .post(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Content-Type", content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        check_status(response).await
    }

    /// Remove objects from a bucket.
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        let url = self.base.join(&format!("object/{bucket}"))?;
        let response = self
            .http
            .delete(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        check_status(response).await
    }

    /// Public URL for an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}object/public/{bucket}/{path}", self.base)
    }
}

async fn check_status(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_shape() {
        let car_id = Uuid::from_u128(7);
        let key = StorageClient::object_key(car_id, 1714399024000, "jpg");
        assert_eq!(
            key,
            "00000000-0000-0000-0000-000000000007/1714399024000.jpg"
        );
    }

    #[test]
    fn test_public_url_shape() {
        let client =
            StorageClient::new("https://project.supabase.co", "anon-key").expect("client builds");
        let url = client.public_url(CAR_IMAGES_BUCKET, "abc/1.jpg");
        assert_eq!(
            url,
            "https://project.supabase.co/storage/v1/object/public/car-images/abc/1.jpg"
        );
    }
}
