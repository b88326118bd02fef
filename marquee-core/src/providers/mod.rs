//! Lookups against third-party services.

pub mod trailer;

pub use trailer::{
    TRAILER_NOT_FOUND, TrailerRef, TrailerResolver, extract_video_id,
    search_query,
};
