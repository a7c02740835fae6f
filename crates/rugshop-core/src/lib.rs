//! Rugshop Core - storefront logic for a hand-made rug shop
//!
//! This crate holds everything the storefront computes on the client:
//! adaptive image compression before upload, catalogue filtering and
//! pagination, admin authorization and form validation, and the
//! orchestration around the auth, document and blob collaborators.

pub mod admin;
pub mod backend;
pub mod catalog;
pub mod compress;
pub mod config;
pub mod decode;
pub mod encode;

pub use compress::{
    compress, compress_batch, CompressError, CompressedImage, CompressionOutcome,
    CompressionSettings, SourceImage,
};
pub use config::StorefrontConfig;
pub use encode::OutputFormat;
