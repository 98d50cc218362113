//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERR_TOKEN_REVOKED: &str = "Token has been revoked";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid email or password";

// User errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_INVALID_USER_ID: &str = "Invalid user ID format";
pub const ERR_EMAIL_EXISTS: &str = "Email already registered";

// Authorization errors
pub const ERR_ADMIN_ONLY: &str = "Only administrators can perform this operation";

// Course errors
pub const ERR_COURSE_NOT_FOUND: &str = "Course not found";
pub const ERR_INVALID_COURSE_ID: &str = "Invalid course ID format";
pub const ERR_ALREADY_ENROLLED: &str = "You are already enrolled in this course";
pub const ERR_ALREADY_PURCHASED: &str = "You have already purchased this course";
pub const ERR_NOT_ENROLLED: &str = "You must enroll in the course before purchasing it";

// Upload errors
pub const ERR_INVALID_IMAGE_TYPE: &str =
    "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed.";
pub const ERR_INVALID_VIDEO_TYPE: &str =
    "Invalid file type. Only MP4, WebM, and QuickTime videos are allowed.";
pub const ERR_FILE_TOO_LARGE: &str = "File too large";
pub const ERR_NO_THUMBNAIL_FILE: &str =
    "No thumbnail provided. Please upload a file with field name 'thumbnail'.";
pub const ERR_NO_VIDEO_FILE: &str =
    "No video provided. Please upload a file with field name 'video'.";
pub const ERR_NO_AVATAR_FILE: &str =
    "No avatar provided. Please upload a file with field name 'avatar'.";
pub const ERR_FAILED_PROCESS_UPLOAD: &str = "Failed to process upload";
pub const ERR_FAILED_SAVE_FILE: &str = "Failed to save file";

// Payment errors
pub const ERR_PAYMENT_ORDER_FAILED: &str = "Failed to create payment order";

// Internal errors
pub const ERR_FAILED_FETCH_USER: &str = "Failed to fetch updated user";
pub const ERR_FAILED_FETCH_COURSE: &str = "Failed to fetch updated course";
pub const ERR_PAGE_SIZE_MISCONFIGURED: &str = "Default page size must be at least 1";
