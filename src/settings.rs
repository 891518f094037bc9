/// Application settings
///
/// The server roots are deliberately explicit configuration rather than
/// hardcoded constants: the API client receives a `Settings` value at
/// construction and never reaches for globals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the photo store lives and how its URL space is laid out
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the server, e.g. "http://localhost:8000"
    pub server_url: String,
    /// URL prefix of the content API, e.g. "/images/"
    pub content_root: String,
    /// URL prefix of the server's static assets (mimetype icons)
    pub static_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            content_root: "/images/".to_string(),
            static_root: "/static/gallery/".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the user's config directory, falling back to
    /// defaults when the file is absent or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => {
                    println!("📁 Settings loaded from {}", path.display());
                    settings
                }
                Err(err) => {
                    eprintln!("⚠️  Ignoring malformed {}: {}", path.display(), err);
                    Self::default()
                }
            },
            // Missing file is the common case on first run
            Err(_) => Self::default(),
        }
    }

    /// Path of the settings file: `<config dir>/gallery-browser/settings.json`
    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("gallery-browser");
        path.push("settings.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.content_root, "/images/");
        assert!(settings.server_url.starts_with("http"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        // A settings file may override only some fields
        let settings: Settings =
            serde_json::from_str(r#"{ "server_url": "https://photos.example.com" }"#).unwrap();
        assert_eq!(settings.server_url, "https://photos.example.com");
        assert_eq!(settings.content_root, "/images/");
        assert_eq!(settings.static_root, "/static/gallery/");
    }
}
