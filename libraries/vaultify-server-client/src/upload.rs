//! Upload operations.

use crate::client::read_json;
use crate::error::{Result, ServerClientError};
use crate::types::{UploadFromUrlRequest, UploadedTrack};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};

/// Upload client for the Vaultify backend.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Upload a single audio file.
    ///
    /// The file goes out as the only part of a multipart form, under the
    /// field name `file`.
    pub async fn upload_file(&self, file_path: &Path) -> Result<UploadedTrack> {
        if !file_path.exists() {
            return Err(ServerClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track")
            .to_string();

        debug!(file = %file_path.display(), "Uploading file");

        let contents = tokio::fs::read(file_path).await?;
        let file_size = contents.len();

        let file_part = Part::bytes(contents)
            .file_name(file_name.clone())
            .mime_str(mime_type_for_file(file_path))?;
        let form = Form::new().part("file", file_part);

        let url = format!("{}/upload", self.base_url);
        let response = self.http.post(&url).multipart(form).send().await?;
        let uploaded: UploadedTrack = read_json(response, "upload").await?;

        info!(file = %file_name, size = file_size, "File uploaded");
        Ok(uploaded)
    }

    /// Have the server fetch and store audio from `source_url`.
    pub async fn upload_from_url(&self, source_url: &str) -> Result<UploadedTrack> {
        let url = format!("{}/upload-from-url", self.base_url);
        debug!(url = %url, source = %source_url, "Uploading from URL");

        let body = UploadFromUrlRequest {
            url: source_url.to_string(),
        };
        let response = self.http.post(&url).json(&body).send().await?;
        let uploaded: UploadedTrack = read_json(response, "upload").await?;

        info!(source = %source_url, "Remote file uploaded");
        Ok(uploaded)
    }
}

/// Get MIME type for audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_file(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(mime_type_for_file(Path::new("SONG.MP3")), "audio/mpeg");
        assert_eq!(mime_type_for_file(Path::new("song.flac")), "audio/flac");
        assert_eq!(mime_type_for_file(Path::new("song.m4a")), "audio/mp4");
        assert_eq!(
            mime_type_for_file(Path::new("song.unknown")),
            "application/octet-stream"
        );
    }
}
