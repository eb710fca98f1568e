//! Data models for mcstats

pub mod login;
pub mod stats;
pub mod world;

pub use login::LoginEvent;
pub use stats::{strip_namespace, StatCategory, StatCounters, StatRecord, WoodType};
pub use world::WorldMeta;
