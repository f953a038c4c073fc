//! Scan entries and type filtering
//!
//! A bank's contents are heterogeneous: nested banks and registries.
//! [`Entry`] is the sum type produced by [`Bank::scan`](crate::Bank::scan),
//! and [`TypeFilter`] selects which kinds a scan admits.

use std::fmt;

use crate::bank::Bank;
use crate::registry::Registry;

/// The kind of filesystem object a path denotes in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory holding nested banks and registries
    Bank,
    /// A regular file holding one fixed-size record
    Registry,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Bank => f.write_str("bank"),
            EntryKind::Registry => f.write_str("registry"),
        }
    }
}

/// One child of a bank, produced only by scanning
///
/// Consumers match exhaustively; there is no third case.
#[derive(Debug)]
pub enum Entry {
    Bank(Bank),
    Registry(Registry),
}

impl Entry {
    /// The kind tag of this entry
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Bank(_) => EntryKind::Bank,
            Entry::Registry(_) => EntryKind::Registry,
        }
    }

    /// The entry's name (final path component), lossily decoded
    pub fn name(&self) -> Option<String> {
        match self {
            Entry::Bank(bank) => bank.name(),
            Entry::Registry(registry) => registry.name(),
        }
    }
}

/// Which entry kinds a scan includes
///
/// A three-variant enum rather than a bitmask: an empty or unrecognized
/// mask cannot be expressed, so it never has to be rejected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    /// Only nested banks
    Banks,
    /// Only registries
    Registries,
    /// Both banks and registries
    Any,
}

impl TypeFilter {
    /// Whether this filter admits entries of the given kind
    pub fn admits(self, kind: EntryKind) -> bool {
        match (self, kind) {
            (TypeFilter::Any, _) => true,
            (TypeFilter::Banks, EntryKind::Bank) => true,
            (TypeFilter::Registries, EntryKind::Registry) => true,
            _ => false,
        }
    }
}
