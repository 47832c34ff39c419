//! Command implementations for the libsync CLI

pub mod sync;

pub use sync::run_sync;
