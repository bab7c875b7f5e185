pub mod auth;
pub mod discord;
pub mod pagination;
pub mod store;
