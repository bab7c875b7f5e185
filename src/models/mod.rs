pub mod join;
pub mod photo_verification;
pub mod profile_diff;
pub mod requests;
pub mod user;
pub mod user_status;
