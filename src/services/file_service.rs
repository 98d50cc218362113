//! File service for handling multipart media uploads.
//!
//! Uploaded files are validated, given uuid-based names, and written under
//! the configured upload directory; the service returns the stored file's
//! public id (the filename) and its serving URL.

use actix_multipart::Multipart;
use futures::StreamExt;
use log::warn;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::CONFIG;
use crate::constants::{ERR_FAILED_PROCESS_UPLOAD, ERR_FAILED_SAVE_FILE};
use crate::errors::ApiError;
use crate::validators::{extension_for_content_type, UploadKind};

/// A file stored by the service.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Filename under the upload directory, usable to replace or delete the file later
    pub public_id: String,
    /// Public URL path the file is served from
    pub url: String,
}

/// Service for media upload operations.
pub struct FileService {
    upload_dir: PathBuf,
}

impl FileService {
    /// Create a new FileService using the configured upload directory.
    pub fn new() -> Self {
        Self {
            upload_dir: PathBuf::from(&CONFIG.upload_dir),
        }
    }

    /// Create a new FileService with a custom upload directory.
    #[allow(dead_code)]
    pub fn with_upload_dir(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// Save a file of the given kind from a multipart payload.
    ///
    /// Only the field named `kind.field_name()` is consumed; other fields
    /// are collected as text and returned alongside the stored file so the
    /// handler can deserialize them.
    pub async fn save_upload(
        &self,
        owner_id: &str,
        kind: UploadKind,
        payload: &mut Multipart,
    ) -> Result<(Option<StoredFile>, Vec<(String, String)>), ApiError> {
        let mut stored = None;
        let mut text_fields = Vec::new();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| {
                warn!("Failed to process multipart field: {}", e);
                ApiError::BadRequest(ERR_FAILED_PROCESS_UPLOAD.to_string())
            })?;

            let field_name = field
                .content_disposition()
                .and_then(|cd| cd.get_name())
                .unwrap_or("")
                .to_string();

            if field_name != kind.field_name() {
                let value = read_text_field(&mut field).await?;
                text_fields.push((field_name, value));
                continue;
            }

            let content_type = field.content_type().map(|ct| ct.to_string());
            kind.validate_content_type(content_type.as_deref())?;

            let extension = extension_for_content_type(content_type.as_deref());
            let filename = format!("{}_{}.{}", owner_id, Uuid::new_v4(), extension);

            if !self.upload_dir.exists() {
                std::fs::create_dir_all(&self.upload_dir).map_err(|e| {
                    warn!("Failed to create upload directory: {}", e);
                    ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
                })?;
            }

            let filepath = self.upload_dir.join(&filename);
            let mut file = std::fs::File::create(&filepath).map_err(|e| {
                warn!("Failed to create file {:?}: {}", filepath, e);
                ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
            })?;

            let mut written: usize = 0;
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| {
                    warn!("Failed to read upload chunk: {}", e);
                    ApiError::BadRequest(ERR_FAILED_PROCESS_UPLOAD.to_string())
                })?;

                written += data.len();
                kind.validate_size(written).inspect_err(|_| {
                    // Partial file is useless, remove it.
                    let _ = std::fs::remove_file(&filepath);
                })?;

                file.write_all(&data).map_err(|e| {
                    warn!("Failed to write file {:?}: {}", filepath, e);
                    ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
                })?;
            }

            stored = Some(StoredFile {
                url: format!("/uploads/{}", filename),
                public_id: filename,
            });
        }

        Ok((stored, text_fields))
    }

    /// Delete a file from the upload directory.
    ///
    /// The file_path should be in the format "/uploads/filename.ext".
    /// Silently ignores paths outside the upload directory and files
    /// that no longer exist.
    pub fn delete_file(&self, file_path: &str) -> Result<(), ApiError> {
        if file_path.starts_with("/uploads/") {
            let filename = file_path.trim_start_matches("/uploads/");
            let filepath = self.upload_dir.join(filename);
            if filepath.exists() {
                let _ = std::fs::remove_file(&filepath);
            }
        }
        Ok(())
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| {
            warn!("Failed to read text field: {}", e);
            ApiError::BadRequest(ERR_FAILED_PROCESS_UPLOAD.to_string())
        })?;
        bytes.extend_from_slice(&data);
    }
    String::from_utf8(bytes)
        .map_err(|_| ApiError::BadRequest(ERR_FAILED_PROCESS_UPLOAD.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_service() -> FileService {
        let dir = std::env::temp_dir().join(format!("devcourses-uploads-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        FileService::with_upload_dir(dir)
    }

    #[test]
    fn test_delete_file_removes_stored_file() {
        let service = temp_service();
        let filepath = service.upload_dir.join("thumb.png");
        std::fs::write(&filepath, b"data").unwrap();

        service.delete_file("/uploads/thumb.png").unwrap();
        assert!(!filepath.exists());
    }

    #[test]
    fn test_delete_file_ignores_missing_and_foreign_paths() {
        let service = temp_service();
        assert!(service.delete_file("/uploads/never-stored.png").is_ok());
        assert!(service.delete_file("/etc/passwd").is_ok());
    }
}
