//! Project metadata synchronization engine
//!
//! This crate turns a host's compilation-unit graph into IDE project
//! artifacts, implementing:
//!
//! - **Classification**: which assets are eligible and what role they play
//! - **Response files**: compiler directive parsing (`-define`, `-r`, `-unsafe`)
//! - **Resolution**: project references, binary references, analyzers, defines
//! - **Rendering**: legacy and SDK-style projects plus the aggregate solution
//! - **SyncEngine**: full and incremental passes that only write what changed
//!
//! # Architecture
//!
//! ```text
//!        CLI / host integration
//!                 |
//!            SyncEngine
//!                 |
//!   +--------+----+-----+---------+
//!   |        |          |         |
//! provider classify  resolve   render ---> ArtifactStore
//!            |          |
//!         response   exclude
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use projsync_core::{FsArtifactStore, SnapshotProvider, SyncEngine, SyncSettings};
//! use projsync_fs::NormalizedPath;
//!
//! fn example() -> projsync_core::Result<()> {
//!     let provider = SnapshotProvider::load(&NormalizedPath::new("unity-snapshot.json"))?;
//!     let engine = SyncEngine::new(
//!         NormalizedPath::new("/work/Game"),
//!         SyncSettings::default(),
//!         Arc::new(provider),
//!         Arc::new(FsArtifactStore::new()),
//!     )?;
//!     let report = engine.full_sync()?;
//!     assert!(report.success());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod exclude;
pub mod ident;
pub mod model;
pub mod paths;
pub mod provider;
pub mod render;
pub mod resolve;
pub mod response;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use classify::UnitClassifier;
pub use config::{LineEnding, ProjectStyle, SyncSettings};
pub use error::{Error, Result};
pub use ident::{DigestIdentifiers, IdentifierGenerator};
pub use model::{AssetClass, CompilationUnit, CompilerOptions, PackageOrigin, RenderedArtifact};
pub use provider::MetadataProvider;
pub use response::{DirectiveError, ResponseFileDirectives, ResponseFileParser};
pub use snapshot::{Snapshot, SnapshotProvider};
pub use store::{ArtifactStore, FsArtifactStore, WriteOutcome, write_if_changed};
pub use sync::{SyncEngine, SyncReport};
