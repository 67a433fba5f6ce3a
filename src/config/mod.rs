//! Configuration for Arlo Peeker
//!
//! - **settings**: the persisted `{image, duration, speed}` record
//! - **store**: JSON file persistence with default fallback

pub mod settings;
pub mod store;

pub use settings::Settings;
pub use store::ConfigStore;
