//! Registry operations
//!
//! A registry is exactly one regular file whose byte length equals the
//! size supplied at open time; its contents are accessed through a shared
//! read-write memory mapping. No header, no framing — the raw bytes of
//! the file are the record.
//!
//! ## Lifecycle
//! ```text
//! Unopened ──open──▶ Open ──close──▶ Closed ──open──▶ Open ── ...
//! ```
//! Read/write are valid only while *Open*. Dropping the handle releases
//! its memory (and, through the descriptor/mapping destructors, any OS
//! resources still held) but never unlinks the file.

use std::fs::{File, OpenOptions};
use std::mem;
use std::path::{Path, PathBuf};

use memmap2::{MmapMut, MmapOptions};

use crate::error::{FdbError, Result};

/// Handle to a registry: one fixed-size record file
#[derive(Debug)]
pub struct Registry {
    /// Resolved absolute path; inherits canonicalization from the root
    path: PathBuf,
    state: MapState,
}

/// Open state as a sum type: a descriptor without a mapping (or the
/// reverse) is unrepresentable.
#[derive(Debug)]
enum MapState {
    Unopened,
    Open(Mapping),
    Closed,
}

/// The live resources of an open registry
#[derive(Debug)]
struct Mapping {
    /// Declared before `file`: the region is unmapped before the
    /// descriptor closes.
    map: MmapMut,
    /// Held so the descriptor stays valid for the whole open state.
    #[allow(dead_code)]
    file: File,
    size: usize,
}

impl Registry {
    /// Wrap an already-resolved path in an *Unopened* handle
    pub(crate) fn unopened(path: PathBuf) -> Self {
        Self {
            path,
            state: MapState::Unopened,
        }
    }

    /// The registry's resolved file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The registry's name (final path component), lossily decoded
    pub fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Whether the registry is currently open
    pub fn is_open(&self) -> bool {
        matches!(self.state, MapState::Open(_))
    }

    /// The mapped size in bytes, while open
    pub fn size(&self) -> Option<usize> {
        match &self.state {
            MapState::Open(mapping) => Some(mapping.size),
            _ => None,
        }
    }

    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Open the registry with the given size
    ///
    /// Opens the file read-write, resizes it to exactly `size` bytes
    /// (truncating or extending), and maps the whole range shared
    /// read-write — writes are visible to any process mapping the same
    /// file. On any failure the descriptor is released before returning
    /// and the handle's state is unchanged.
    pub fn open(&mut self, size: usize) -> Result<()> {
        if self.is_open() {
            return Err(FdbError::AlreadyOpen(self.path.clone()));
        }

        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        file.set_len(size as u64)?;

        // Safety: the mapping is private to this handle until exposed via
        // read/write/as_slice; concurrent external mutation of the file is
        // the documented shared-memory contract of a registry.
        let map = unsafe { MmapOptions::new().len(size).map_mut(&file)? };

        tracing::debug!("opened registry {} ({} bytes)", self.path.display(), size);
        self.state = MapState::Open(Mapping { map, file, size });
        Ok(())
    }

    /// Close the registry: unmap the region and close the descriptor
    ///
    /// Fails with `NotOpen` if there is nothing to close. The handle
    /// transitions to *Closed* and may be reopened.
    ///
    /// Both steps run through the mapping's and descriptor's destructors,
    /// which cannot surface a `munmap`/`close(2)` failure; on Linux the
    /// descriptor is gone once `close(2)` returns regardless of its
    /// result, so nothing leaks either way.
    pub fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, MapState::Closed) {
            MapState::Open(mapping) => {
                drop(mapping);
                tracing::debug!("closed registry {}", self.path.display());
                Ok(())
            }
            previous => {
                self.state = previous;
                Err(FdbError::NotOpen(self.path.clone()))
            }
        }
    }

    // =========================================================================
    // Read / Write
    // =========================================================================

    /// Copy the registry's contents into `buf`
    ///
    /// Copies exactly `size` bytes; `buf` must be at least that long.
    /// A pure memory copy: reflects whatever is currently visible in the
    /// mapping, including writes by concurrent external mappers.
    pub fn read(&self, buf: &mut [u8]) -> Result<()> {
        let mapping = self.mapping()?;
        if buf.len() < mapping.size {
            return Err(FdbError::BufferTooSmall {
                len: buf.len(),
                size: mapping.size,
            });
        }
        buf[..mapping.size].copy_from_slice(&mapping.map);
        Ok(())
    }

    /// Copy `buf` into the registry
    ///
    /// Symmetric to [`read`](Registry::read). Does not force
    /// synchronization to the backing file; durability timing is left to
    /// the platform's flush policy (see [`sync`](Registry::sync)).
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let mapping = self.mapping_mut()?;
        if buf.len() < mapping.size {
            return Err(FdbError::BufferTooSmall {
                len: buf.len(),
                size: mapping.size,
            });
        }
        let size = mapping.size;
        mapping.map.copy_from_slice(&buf[..size]);
        Ok(())
    }

    /// Borrow the mapped bytes directly
    pub fn as_slice(&self) -> Result<&[u8]> {
        Ok(&self.mapping()?.map)
    }

    /// Borrow the mapped bytes mutably
    pub fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
        Ok(&mut self.mapping_mut()?.map)
    }

    /// Flush the mapping to the backing file
    pub fn sync(&self) -> Result<()> {
        self.mapping()?.map.flush()?;
        Ok(())
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Unlink the backing file
    ///
    /// Works regardless of open state and never closes an open mapping;
    /// what an unlinked-but-mapped file means is left to the platform.
    /// The handle stays usable for a subsequent [`close`](Registry::close).
    pub fn remove(&self) -> Result<()> {
        if self.is_open() {
            tracing::warn!("removing registry {} while open", self.path.display());
        }
        std::fs::remove_file(&self.path)?;
        tracing::debug!("removed registry {}", self.path.display());
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn mapping(&self) -> Result<&Mapping> {
        match &self.state {
            MapState::Open(mapping) => Ok(mapping),
            _ => Err(FdbError::NotOpen(self.path.clone())),
        }
    }

    fn mapping_mut(&mut self) -> Result<&mut Mapping> {
        match &mut self.state {
            MapState::Open(mapping) => Ok(mapping),
            _ => Err(FdbError::NotOpen(self.path.clone())),
        }
    }
}
