/// HTTP client for the photo store
///
/// All requests are plain async calls; the application turns each one into
/// a task whose result comes back as a message. The client never retries a
/// mutation on its own; a failed submission is surfaced to the user.

use std::path::PathBuf;

use reqwest::multipart;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::types::{FolderContents, PermissionRecord, PermissionSet};
use crate::settings::Settings;
use crate::state::path;

/// Typed access to the server's REST interface
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    settings: Settings,
}

impl ApiClient {
    /// Build a client for the configured server
    pub fn new(settings: Settings) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");
        ApiClient { http, settings }
    }

    /// Fetch the authoritative listing of a folder
    ///
    /// `folder_path` must be a folder path (trailing slash); the response is
    /// keyed by exactly that path.
    pub async fn contents(&self, folder_path: &str) -> Result<FolderContents, ApiError> {
        let url = self.content_url("contents", folder_path);
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// Upload one file into a folder and get the refreshed listing back
    ///
    /// The file travels as a single multipart field named `upload`.
    pub async fn add_file(
        &self,
        folder_path: &str,
        file: PathBuf,
    ) -> Result<FolderContents, ApiError> {
        let data = tokio::fs::read(&file).await.map_err(|err| {
            ApiError::Transport(format!("failed to read {}: {}", file.display(), err))
        })?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form =
            multipart::Form::new().part("upload", multipart::Part::bytes(data).file_name(file_name));

        let url = self.content_url("add_file", folder_path);
        let response = self.http.post(url).multipart(form).send().await?;
        Self::decode(response).await
    }

    /// Create a subfolder and get the refreshed listing back
    pub async fn add_folder(
        &self,
        folder_path: &str,
        name: &str,
    ) -> Result<FolderContents, ApiError> {
        let url = self.content_url("add_folder", folder_path);
        let body = serde_json::json!({ "name": name });
        let response = self.http.post(url).json(&body).send().await?;
        Self::decode(response).await
    }

    /// Delete a file or folder; the server answers with the parent folder's
    /// refreshed listing
    pub async fn delete(&self, target_path: &str) -> Result<FolderContents, ApiError> {
        let url = self.content_url("delete", target_path);
        let response = self.http.post(url).send().await?;
        Self::decode(response).await
    }

    /// Fetch a folder's sharing configuration
    pub async fn permissions(&self, folder_path: &str) -> Result<PermissionSet, ApiError> {
        let url = self.content_url("permissions", folder_path);
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// Submit an edited sharing configuration; the server answers with the
    /// configuration now in effect
    pub async fn update_permissions(
        &self,
        folder_path: &str,
        description: String,
        permissions: Vec<PermissionRecord>,
    ) -> Result<PermissionSet, ApiError> {
        let url = self.content_url("permissions", folder_path);
        let body = serde_json::json!({
            "description": description,
            "permissions": permissions,
        });
        let response = self.http.post(url).json(&body).send().await?;
        Self::decode(response).await
    }

    /// Fetch a server-resized rendition of an image file
    pub async fn render(&self, file_path: &str, size: u32) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}?size={}", self.content_url("render", file_path), size);
        self.fetch_bytes(&url).await
    }

    /// Fetch one of the server's static assets, e.g. a mimetype icon
    pub async fn static_asset(&self, relative: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!(
            "{}{}{}",
            self.settings.server_url.trim_end_matches('/'),
            self.settings.static_root,
            relative
        );
        self.fetch_bytes(&url).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Build a content API URL: `<server><content_root><endpoint><path>`
    fn content_url(&self, endpoint: &str, target_path: &str) -> String {
        format!(
            "{}{}{}{}",
            self.settings.server_url.trim_end_matches('/'),
            self.settings.content_root,
            endpoint,
            path::rooted(target_path)
        )
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = response.error_for_status()?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(Settings {
            server_url: "http://localhost:8000".into(),
            content_root: "/images/".into(),
            static_root: "/static/gallery/".into(),
        })
    }

    #[test]
    fn test_content_urls() {
        let api = client();
        assert_eq!(
            api.content_url("contents", "/"),
            "http://localhost:8000/images/contents/"
        );
        assert_eq!(
            api.content_url("contents", "/foo/bar/"),
            "http://localhost:8000/images/contents/foo/bar/"
        );
        assert_eq!(
            api.content_url("delete", "/foo/bar/baz.jpg"),
            "http://localhost:8000/images/delete/foo/bar/baz.jpg"
        );
    }

    #[test]
    fn test_content_url_roots_bare_paths() {
        // Server listings may carry paths without a leading slash
        let api = client();
        assert_eq!(
            api.content_url("contents", "foo/"),
            "http://localhost:8000/images/contents/foo/"
        );
    }

    #[test]
    fn test_trailing_slash_on_server_url() {
        let api = ApiClient::new(Settings {
            server_url: "http://localhost:8000/".into(),
            ..Settings::default()
        });
        assert_eq!(
            api.content_url("contents", "/"),
            "http://localhost:8000/images/contents/"
        );
    }
}
