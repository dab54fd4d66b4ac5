//! jsongraph Store - local persistence of named JSON documents
//!
//! Documents are kept in a sled database, one bincode record per
//! document. Alongside storage the crate provides what an editor shows
//! about a document: line/character/byte counts, parse validation, and a
//! shallow count of top-level key changes between two versions.
//!
//! # Example
//!
//! ```no_run
//! use jsongraph_store::DocumentStore;
//!
//! let store = DocumentStore::open("/tmp/jsongraph-docs")?;
//! let doc = store.create_named("settings", r#"{"theme": "dark"}"#)?;
//! assert!(doc.validate().is_valid);
//! # Ok::<(), jsongraph_store::StoreError>(())
//! ```

mod changes;
mod document;
mod store;

pub use changes::KeyChanges;
pub use document::{generate_name, ContentStats, JsonDocument, Validation};
pub use store::{DocumentStore, Result, StoreError, StoreTotals};
