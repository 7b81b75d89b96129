//! # Women in Mathematics Common Library
//!
//! Shared code for the adapter binaries:
//! - Error type
//! - Configuration loading (TOML + environment)
//! - Dataset document models
//! - JSON document store for the prepared output

pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use models::{AuthorRecord, BiographicalData, DatasetDocument, TextDocument, TextItem};
pub use store::{DatasetStore, SavedPaths};
