//! Model registry boundary for pdf-importer.
//!
//! This crate defines the asynchronous [`RegistryClient`] the controller talks
//! to, the read-only [`ImportSource`] behind the import views, and
//! [`InMemoryRegistry`], a store that implements both with the same rules the
//! HTTP service enforces (sequential ids, newest-first listing, delete
//! protection for models that still have imports).
//!
//! # Example
//!
//! ```
//! use pdfi_core::schema;
//! use pdfi_registry::{InMemoryRegistry, RegistryClient};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let registry = InMemoryRegistry::new();
//! let created = registry
//!     .create("Invoice Model", &schema::default_template())
//!     .await
//!     .unwrap();
//! assert_eq!(created.id.as_i64(), 1);
//! assert_eq!(registry.list().await.unwrap().len(), 1);
//! # });
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod client;
mod error;
mod memory;

pub use client::{ImportSource, RegistryClient, RegistryResult};
pub use error::RegistryError;
pub use memory::InMemoryRegistry;
