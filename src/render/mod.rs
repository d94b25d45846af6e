//! Rendering of outline results.

mod json;

pub use json::{to_json, to_json_bytes, JsonFormat};
