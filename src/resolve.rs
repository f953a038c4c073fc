//! Path building and existence probing
//!
//! Every bank/registry operation funnels through these two helpers:
//! [`join_name`] extends an already-resolved parent path by one validated
//! component, and [`probe`] classifies what a path currently denotes.
//!
//! `join_name` never touches the filesystem and never canonicalizes.
//! Canonicalization happens exactly once, at [`Root::init`](crate::Root::init);
//! child paths inherit correctness from their resolved parent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::entry::EntryKind;
use crate::error::{FdbError, Result};

/// Outcome of probing a path for an expected kind
#[derive(Debug)]
pub(crate) enum Probe {
    /// The metadata query failed (not found, permissions, ...)
    Absent(io::Error),
    /// The path exists but denotes the wrong kind of object
    WrongType,
    /// The path exists and denotes the expected kind
    Exists,
}

/// Join a validated child name onto a resolved parent path
///
/// Rejects names containing a path separator (or NUL) before any
/// filesystem call is made.
pub(crate) fn join_name(parent: &Path, name: &str) -> Result<PathBuf> {
    if name.contains(MAIN_SEPARATOR) || name.contains('\0') {
        return Err(FdbError::InvalidName(name.to_string()));
    }
    Ok(parent.join(name))
}

/// Classify what `path` currently denotes, relative to an expected kind
///
/// One `stat` call; symlinks are followed, so a symlink to a directory
/// probes as a bank.
pub(crate) fn probe(path: &Path, expected: EntryKind) -> Probe {
    match fs::metadata(path) {
        Err(e) => Probe::Absent(e),
        Ok(meta) => {
            let matches = match expected {
                EntryKind::Bank => meta.is_dir(),
                EntryKind::Registry => meta.is_file(),
            };
            if matches {
                Probe::Exists
            } else {
                Probe::WrongType
            }
        }
    }
}

/// Kind of an existing path, if it is one the store models
pub(crate) fn kind_of(meta: &fs::Metadata) -> Option<EntryKind> {
    if meta.is_dir() {
        Some(EntryKind::Bank)
    } else if meta.is_file() {
        Some(EntryKind::Registry)
    } else {
        None
    }
}
