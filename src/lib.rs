//! # Pattern Catalog
//!
//! Runnable miniatures of classical object-oriented design patterns, each one
//! wired end-to-end with a small driver scenario whose console trace makes the
//! pattern's dynamics visible.
//!
//! ## Patterns Covered
//!
//! 1. **Command** - Undoable copy/cut/paste actions with a history stack
//! 2. **Observer** - Channel-keyed event manager with ordered delivery
//! 3. **Iterator** - Lazy cached contact traversal and binary tree traversals
//! 4. **State** - Parcel lifecycle where phases own their transitions
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run --bin command_editor
//! cargo run --bin observer_events
//! cargo run --bin iterator_profiles -- catalog.toml
//! cargo run --bin iterator_tree
//! cargo run --bin state_package
//! cargo run --bin catalog
//! ```
//!
//! Set `RUST_LOG=debug` to see refusals and remote fetches on stderr.
//!
//! ## Key Dependencies
//!
//! - `thiserror` - Derive macro for the catalog error type
//! - `serde` + `toml` - Driver configuration
//! - `tracing` - Structured diagnostics
//! - `colored` - Section headings in driver output

pub mod command;
pub mod config;
pub mod error;
pub mod iterator;
pub mod observer;
pub mod scenario;
pub mod state;
pub mod telemetry;
pub mod transcript;

pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use transcript::Transcript;
