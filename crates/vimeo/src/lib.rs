//! REST client for the Vimeo API.
//!
//! Wraps the endpoints the platform relays server-side: video upload,
//! metadata/duration lookup, and the caption (text track) sub-resource.
//! The browser never talks to Vimeo directly.

mod api;

pub use api::{Caption, UploadedVideo, VimeoApi, VimeoApiError};
