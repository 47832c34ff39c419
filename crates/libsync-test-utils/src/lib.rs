//! Shared test utilities for the libsync workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`library`]: [`TestLibrary`] builder for source/destination trees

pub mod library;

pub use library::{TestLibrary, TreeSnapshot};
