//! Core of the postcal content calendar.
//!
//! - `post`: the post record and its status/platform enums
//! - `store`: the post store with best-effort persistence
//! - `sink`: key-value persistence backends
//! - `grid`: month grid layout
//! - `month`, `stats`, `config`: navigation, counts and settings

pub mod config;
pub mod error;
pub mod grid;
pub mod month;
pub mod post;
pub mod sink;
pub mod stats;
pub mod store;

pub use error::{PostcalError, PostcalResult};
pub use post::{Platform, Post, PostDraft, PostStatus};
pub use store::PostStore;
