//! # FDB
//!
//! A minimal hierarchical record store built directly on a filesystem:
//! - Banks: named containers backed by directories
//! - Registries: fixed-size binary records backed by regular files,
//!   accessed through a shared read-write memory mapping
//! - Primitives that translate 1:1 onto filesystem semantics
//!   (mkdir, stat, scandir, open/O_EXCL, ftruncate, mmap, unlink)
//!
//! ## On-Disk Layout
//!
//! ```text
//! $FDB_ROOT/                  (root: canonicalized directory)
//! ├── users/                  (bank: one directory)
//! │   ├── alice               (registry: one regular file, raw bytes)
//! │   └── admins/             (nested bank)
//! │       └── bob
//! └── sessions/
//! ```
//!
//! No header, no magic bytes, no metadata file: the raw byte contents of
//! a registry file are the record, and its length is fixed at open time.
//!
//! ## Example
//!
//! ```no_run
//! use fdb::{Config, Root, TypeFilter};
//!
//! let root = Root::init(&Config::default())?;
//! let users = root.create_bank("users")?.created().unwrap();
//!
//! let mut alice = users.create_registry("alice")?.created().unwrap();
//! alice.open(128)?;
//! alice.write(&[0xAB; 128])?;
//! alice.close()?;
//!
//! for entry in root.scan(TypeFilter::Any)? {
//!     println!("{:?}: {:?}", entry.kind(), entry.name());
//! }
//! # Ok::<(), fdb::FdbError>(())
//! ```
//!
//! ## Concurrency Model
//!
//! Every operation is a direct, blocking sequence of filesystem calls;
//! there is no background work. Creation races are resolved by the
//! platform's atomic exclusive-creation guarantee. Beyond creation there
//! is no coordination: concurrent mappers of one registry see ordinary
//! shared-memory semantics, and callers needing exclusivity must bring
//! their own locking.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod bank;
pub mod entry;
pub mod registry;
pub mod root;

mod resolve;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use bank::{Bank, CreateOutcome};
pub use config::Config;
pub use entry::{Entry, EntryKind, TypeFilter};
pub use error::{FdbError, Result};
pub use registry::Registry;
pub use root::Root;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
