//! Root namespace
//!
//! The root is an explicit context value, not process-global state: every
//! bank and registry path is anchored under a [`Root`]'s canonicalized
//! directory, and a test process may hold several independent roots at
//! once. Dropping the root releases its path and nothing else.

use std::env;
use std::fs::DirBuilder;
use std::io::ErrorKind;
use std::ops::Deref;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::bank::Bank;
use crate::config::Config;
use crate::error::Result;

/// Mode for a freshly created root directory: owner+group rwx
const ROOT_DIR_MODE: u32 = 0o770;

/// The root of a store: a canonicalized directory all paths live under
///
/// `Root` dereferences to [`Bank`], so bank operations apply to the root
/// directory itself:
///
/// ```no_run
/// use fdb::{Config, Root};
///
/// let root = Root::init(&Config::default())?;
/// let users = root.create_bank("users")?;
/// # Ok::<(), fdb::FdbError>(())
/// ```
#[derive(Debug)]
pub struct Root {
    bank: Bank,
}

impl Root {
    /// Resolve, create if absent, and canonicalize the root directory
    ///
    /// Resolution order:
    /// 1. The environment variable named by `config.root_env`
    /// 2. `config.fallback_root` if the variable is unset or empty
    ///
    /// The directory is created with mode 0770 if absent; an already
    /// existing directory is success. Fails if creation fails for any
    /// other reason, or if canonicalization fails.
    pub fn init(config: &Config) -> Result<Self> {
        let raw: PathBuf = match env::var_os(&config.root_env) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => config.fallback_root.clone(),
        };

        let mut builder = DirBuilder::new();
        builder.mode(ROOT_DIR_MODE);
        match builder.create(&raw) {
            Ok(()) => tracing::debug!("created root directory {}", raw.display()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        // The single canonicalization point: children inherit from here.
        let resolved = raw.canonicalize()?;
        tracing::debug!("root initialized at {}", resolved.display());

        Ok(Self {
            bank: Bank::from_resolved(resolved),
        })
    }

    /// The canonicalized root directory path
    pub fn path(&self) -> &Path {
        self.bank.path()
    }

    /// The root directory viewed as a bank
    pub fn as_bank(&self) -> &Bank {
        &self.bank
    }
}

impl Deref for Root {
    type Target = Bank;

    fn deref(&self) -> &Bank {
        &self.bank
    }
}
