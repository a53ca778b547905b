//! TrackX Core - GPS extraction, formats, and case payload assembly
//!
//! This crate contains the extraction pipeline and domain models for the
//! TrackX vehicle-tracking forensics toolkit.

pub mod config;
pub mod error;
pub mod extract;
pub mod formats;
pub mod geo;
pub mod models;
pub mod payload;

pub use error::{Result, TrackxError};
pub use extract::GpsExtractor;
