//! ropucha is a small server-rendered discussion forum: boards hold topics,
//! topics hold posts. See `ropucha.example.toml` for configuration.

pub mod config;
pub mod database;
pub mod forms;
pub mod gravatar;
pub mod pagination;
pub mod router;
pub mod templates;
