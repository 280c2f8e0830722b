//! Storage module for uploaded storefront images
//!
//! Provides a MinIO/S3-compatible client for storing product and banner
//! images and serving them through direct public URLs.

mod image_store;

pub use image_store::ImageStore;
