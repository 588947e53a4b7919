//! Extractors whose rejections render as `{"detail": ...}` bodies.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
