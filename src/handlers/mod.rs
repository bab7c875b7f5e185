pub mod discord;
pub mod health;
pub mod intro;
pub mod profile_diffs;
pub mod users;
pub mod verification;
