//! Core types, errors, and utilities for pdf-importer.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for consistent error handling
//! - Configuration structures
//! - Domain types (`ModelDefinition`, `ImportRecord`, `ImportStatus`)
//! - The schema text validator ([`schema`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod schema;
pub mod types;

pub use config::{ColorScheme, Config, RegistryConfig, TuiConfig};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use schema::{ParseFault, Schema};
pub use types::{ImportId, ImportRecord, ImportStatus, ModelDefinition, ModelId};
