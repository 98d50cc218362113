//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_USER_REGISTERED: &str = "User registered successfully";
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout successful";
pub const MSG_PROFILE_RETRIEVED: &str = "User profile retrieved";
pub const MSG_PROFILE_UPDATED: &str = "User profile updated successfully";

// Course messages
pub const MSG_COURSE_CREATED: &str = "Course created successfully";
pub const MSG_COURSE_UPDATED: &str = "Course updated successfully";
pub const MSG_COURSE_DELETED: &str = "Course deleted successfully";
pub const MSG_COURSE_FOUND: &str = "Course fetched successfully";
pub const MSG_MODULES_ADDED: &str = "Modules added successfully";
pub const MSG_VIDEO_UPLOADED: &str = "Video uploaded successfully";

// Enrollment messages
pub const MSG_ENROLLED: &str = "Enrolled in course successfully";
pub const MSG_PAYMENT_PROCESSED: &str = "Payment order created successfully";
