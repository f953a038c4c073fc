//! Bank operations
//!
//! A bank is exactly one filesystem directory. The handle carries the
//! resolved path and nothing else; creating a handle never creates the
//! directory, and dropping a handle never touches storage.
//!
//! ## Responsibilities
//! - Create and look up nested banks and registries
//! - Scan immediate children in stable sorted order with kind filtering
//! - Recursively remove a bank and everything under it

use std::ffi::OsString;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::ErrorKind;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use crate::entry::{Entry, EntryKind, TypeFilter};
use crate::error::{FdbError, Result};
use crate::registry::Registry;
use crate::resolve::{join_name, kind_of, probe, Probe};

/// Mode for created banks and registries
const CHILD_MODE: u32 = 0o700;

/// Outcome of a creation attempt
///
/// Losing a creation race is not an error: the platform's atomic
/// exclusive-creation guarantee makes `AlreadyExists` a reliable signal
/// that another creator won, distinct from "path unusable" (which is
/// reported as [`FdbError::WrongType`] or [`FdbError::Io`]).
#[derive(Debug)]
pub enum CreateOutcome<T> {
    /// The object was freshly created; the handle owns its path
    Created(T),
    /// An object of the expected kind already exists; no handle produced
    AlreadyExists,
}

impl<T> CreateOutcome<T> {
    /// The freshly created handle, if any
    pub fn created(self) -> Option<T> {
        match self {
            CreateOutcome::Created(inner) => Some(inner),
            CreateOutcome::AlreadyExists => None,
        }
    }

    /// Whether the target already existed
    pub fn already_exists(&self) -> bool {
        matches!(self, CreateOutcome::AlreadyExists)
    }
}

/// Handle to a bank: one directory under a [`Root`](crate::Root)
#[derive(Debug, Clone)]
pub struct Bank {
    /// Resolved absolute path; inherits canonicalization from the root
    path: PathBuf,
}

impl Bank {
    /// Wrap an already-resolved path. Callers guarantee the path is
    /// anchored under a canonicalized root.
    pub(crate) fn from_resolved(path: PathBuf) -> Self {
        Self { path }
    }

    /// The bank's resolved directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bank's name (final path component), lossily decoded
    pub fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a nested bank
    ///
    /// Returns `Created` with a new handle, or `AlreadyExists` if the name
    /// already denotes a bank. If the name denotes something else the path
    /// is unusable and the error is `WrongType`.
    pub fn create_bank(&self, name: &str) -> Result<CreateOutcome<Bank>> {
        let path = join_name(&self.path, name)?;

        let mut builder = DirBuilder::new();
        builder.mode(CHILD_MODE);
        match builder.create(&path) {
            Ok(()) => {
                tracing::debug!("created bank {}", path.display());
                Ok(CreateOutcome::Created(Bank::from_resolved(path)))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                match probe(&path, EntryKind::Bank) {
                    Probe::Exists => Ok(CreateOutcome::AlreadyExists),
                    Probe::WrongType => Err(FdbError::WrongType {
                        path,
                        expected: EntryKind::Bank,
                    }),
                    Probe::Absent(err) => Err(err.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create a registry in this bank
    ///
    /// The file is created exclusively with restrictive permissions and
    /// its descriptor is closed before returning; a registry is never left
    /// open by creation. The returned handle is in the *Unopened* state.
    pub fn create_registry(&self, name: &str) -> Result<CreateOutcome<Registry>> {
        let path = join_name(&self.path, name)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(CHILD_MODE)
            .open(&path)
        {
            Ok(file) => {
                // Descriptor must not outlive creation.
                drop(file);
                tracing::debug!("created registry {}", path.display());
                Ok(CreateOutcome::Created(Registry::unopened(path)))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                match probe(&path, EntryKind::Registry) {
                    Probe::Exists => Ok(CreateOutcome::AlreadyExists),
                    Probe::WrongType => Err(FdbError::WrongType {
                        path,
                        expected: EntryKind::Registry,
                    }),
                    Probe::Absent(err) => Err(err.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up a nested bank by name
    ///
    /// Probe only, no mutation. `WrongType` if the name denotes something
    /// other than a directory; the underlying IO error (typically
    /// `NotFound`) if it denotes nothing.
    pub fn bank(&self, name: &str) -> Result<Bank> {
        let path = join_name(&self.path, name)?;
        match probe(&path, EntryKind::Bank) {
            Probe::Exists => Ok(Bank::from_resolved(path)),
            Probe::WrongType => Err(FdbError::WrongType {
                path,
                expected: EntryKind::Bank,
            }),
            Probe::Absent(err) => Err(err.into()),
        }
    }

    /// Look up a registry by name
    ///
    /// Returns an *Unopened* handle; the file is not opened or mapped.
    pub fn registry(&self, name: &str) -> Result<Registry> {
        let path = join_name(&self.path, name)?;
        match probe(&path, EntryKind::Registry) {
            Probe::Exists => Ok(Registry::unopened(path)),
            Probe::WrongType => Err(FdbError::WrongType {
                path,
                expected: EntryKind::Registry,
            }),
            Probe::Absent(err) => Err(err.into()),
        }
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// List this bank's immediate children, filtered by kind
    ///
    /// Children appear in stable sorted name order. Objects that are
    /// neither directories nor regular files (sockets, fifos, ...) are
    /// skipped. If any metadata query fails mid-scan the whole scan
    /// aborts: handles already built are dropped and the error is
    /// returned — callers never see a partial list.
    pub fn scan(&self, filter: TypeFilter) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for name in self.sorted_children()? {
            let path = self.path.join(&name);
            // `?` aborts the scan; `entries` rolls back through Drop.
            let meta = fs::metadata(&path)?;
            let Some(kind) = kind_of(&meta) else {
                continue;
            };
            if !filter.admits(kind) {
                continue;
            }
            entries.push(match kind {
                EntryKind::Bank => Entry::Bank(Bank::from_resolved(path)),
                EntryKind::Registry => Entry::Registry(Registry::unopened(path)),
            });
        }

        Ok(entries)
    }

    /// Count this bank's immediate children admitted by `filter`
    ///
    /// Same walk as [`scan`](Bank::scan) but allocates no handles.
    pub fn count(&self, filter: TypeFilter) -> Result<usize> {
        let mut n = 0;

        for name in self.sorted_children()? {
            let meta = fs::metadata(self.path.join(&name))?;
            match kind_of(&meta) {
                Some(kind) if filter.admits(kind) => n += 1,
                _ => {}
            }
        }

        Ok(n)
    }

    /// Child names in stable byte-wise sorted order
    ///
    /// `read_dir` never yields the self/parent pseudo-entries, but its
    /// order is platform-defined, so the sort here is what makes scans
    /// reproducible.
    fn sorted_children(&self) -> Result<Vec<OsString>> {
        let mut names: Vec<OsString> = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            names.push(entry?.file_name());
        }
        names.sort();
        Ok(names)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Recursively remove this bank and everything under it
    ///
    /// Depth-first, children before the directory itself. Stops at the
    /// first filesystem failure; siblings after a failure are not
    /// attempted. Consumes the handle: nothing meaningful remains of it
    /// once the directory is gone.
    pub fn remove(self) -> Result<()> {
        remove_tree(&self.path)?;
        tracing::debug!("removed bank {}", self.path.display());
        Ok(())
    }
}

/// Depth-first removal of a directory tree, fail-fast
///
/// Symlinks are unlinked, not followed.
fn remove_tree(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            remove_tree(&entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    fs::remove_dir(dir)?;
    Ok(())
}
