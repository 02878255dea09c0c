//! Extractors that reject with [`AppError`](crate::errors::AppError) bodies
//! instead of axum's plain-text rejections.

pub mod id_path;

pub use id_path::IdPath;
