//! Background Tasks Module
//!
//! Contains background tasks that run periodically beside the engine.
//!
//! # Tasks
//! - Crawler: runs an active-expiration crawler at a configured interval

mod crawler;

pub use crawler::{shared, spawn_crawler_task, Crawler, SharedEngine};
