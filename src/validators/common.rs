//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::constants::{
    ERR_FILE_TOO_LARGE, ERR_INVALID_IMAGE_TYPE, ERR_INVALID_VIDEO_TYPE,
};
use crate::errors::ApiError;
use crate::models::DifficultyLevel;

/// Allowed image content types for thumbnail and avatar uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Allowed video content types for course video uploads.
pub const ALLOWED_VIDEO_TYPES: [&str; 3] = ["video/mp4", "video/webm", "video/quicktime"];

/// Maximum file size for image uploads (5MB).
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum file size for video uploads (200MB).
pub const MAX_VIDEO_SIZE: usize = 200 * 1024 * 1024;

/// The kind of media a multipart upload is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Thumbnail,
    Avatar,
    Video,
}

impl UploadKind {
    /// Multipart field name the file must arrive under.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::Thumbnail => "thumbnail",
            UploadKind::Avatar => "avatar",
            UploadKind::Video => "video",
        }
    }

    /// Validate an upload's content type for this kind.
    pub fn validate_content_type(&self, content_type: Option<&str>) -> Result<(), ApiError> {
        let (allowed, error): (&[&str], &str) = match self {
            UploadKind::Thumbnail | UploadKind::Avatar => {
                (&ALLOWED_IMAGE_TYPES, ERR_INVALID_IMAGE_TYPE)
            }
            UploadKind::Video => (&ALLOWED_VIDEO_TYPES, ERR_INVALID_VIDEO_TYPE),
        };

        match content_type {
            Some(ct) if allowed.iter().any(|t| ct.starts_with(t)) => Ok(()),
            _ => Err(ApiError::BadRequest(error.to_string())),
        }
    }

    /// Validate an upload's size for this kind.
    pub fn validate_size(&self, size: usize) -> Result<(), ApiError> {
        let max = match self {
            UploadKind::Thumbnail | UploadKind::Avatar => MAX_IMAGE_SIZE,
            UploadKind::Video => MAX_VIDEO_SIZE,
        };

        if size > max {
            return Err(ApiError::BadRequest(format!(
                "{}. Maximum size is {}MB.",
                ERR_FILE_TOO_LARGE,
                max / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

/// Get a file extension for a content type.
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("image/jpeg") => "jpg",
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("video/mp4") => "mp4",
        Some("video/webm") => "webm",
        Some("video/quicktime") => "mov",
        _ => "bin",
    }
}

/// Parse a difficulty level from untrusted input.
pub fn parse_difficulty(raw: &str) -> Result<DifficultyLevel, ApiError> {
    match raw.to_lowercase().as_str() {
        "beginner" => Ok(DifficultyLevel::Beginner),
        "intermediate" => Ok(DifficultyLevel::Intermediate),
        "advanced" => Ok(DifficultyLevel::Advanced),
        other => Err(ApiError::BadRequest(format!(
            "Unknown difficulty level '{}'. Use beginner, intermediate, or advanced.",
            other
        ))),
    }
}

/// Convert validator errors to ApiError::ValidationError.
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    ApiError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty("beginner").unwrap(), DifficultyLevel::Beginner);
        assert_eq!(
            parse_difficulty("INTERMEDIATE").unwrap(),
            DifficultyLevel::Intermediate
        );
        assert_eq!(parse_difficulty("Advanced").unwrap(), DifficultyLevel::Advanced);
        assert!(parse_difficulty("expert").is_err());
    }

    #[test]
    fn test_validate_content_type_per_kind() {
        assert!(UploadKind::Thumbnail
            .validate_content_type(Some("image/png"))
            .is_ok());
        assert!(UploadKind::Thumbnail
            .validate_content_type(Some("video/mp4"))
            .is_err());
        assert!(UploadKind::Video
            .validate_content_type(Some("video/mp4"))
            .is_ok());
        assert!(UploadKind::Video
            .validate_content_type(Some("image/png"))
            .is_err());
        assert!(UploadKind::Avatar.validate_content_type(None).is_err());
    }

    #[test]
    fn test_validate_size_limits() {
        assert!(UploadKind::Avatar.validate_size(MAX_IMAGE_SIZE).is_ok());
        assert!(UploadKind::Avatar.validate_size(MAX_IMAGE_SIZE + 1).is_err());
        assert!(UploadKind::Video.validate_size(MAX_IMAGE_SIZE + 1).is_ok());
        assert!(UploadKind::Video.validate_size(MAX_VIDEO_SIZE + 1).is_err());
    }

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type(Some("image/jpeg")), "jpg");
        assert_eq!(extension_for_content_type(Some("video/quicktime")), "mov");
        assert_eq!(extension_for_content_type(None), "bin");
    }
}
