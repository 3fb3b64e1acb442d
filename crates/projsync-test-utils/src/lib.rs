//! Shared test utilities for the projsync workspace.
//!
//! This crate provides in-memory fixtures so engine tests never touch the
//! filesystem. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`provider`]: [`FakeProvider`] builder standing in for a host's unit graph
//! - [`store`]: [`MemoryArtifactStore`] counting reads and writes

pub mod provider;
pub mod store;

pub use provider::FakeProvider;
pub use store::MemoryArtifactStore;
