pub mod api;
pub mod config;
pub mod downloader;
pub mod errors;
pub mod security;
pub mod toggles;
pub mod track;
pub mod utils;

pub use api::{SourceType, TrackInfo};
pub use errors::{AppError, Result};
pub use track::{Liveness, Resolution, ResolveContext, Track, TrackField};
