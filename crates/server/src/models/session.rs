//! Session keys for authentication data.

/// Key for the logged-in [`gymhub_core::SessionUser`].
pub const SESSION_USER: &str = "session_user";
