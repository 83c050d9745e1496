//! Temporary directories holding configuration documents.
//!
//! Files are written through a `cap-std` handle on the directory, so tests
//! never touch paths outside it.
//!
//! # Examples
//!
//! ```
//! use test_helpers::files::ConfigDir;
//!
//! let dir = ConfigDir::new()?;
//! let path = dir.write("app.xml", "<app a='1'/>")?;
//! assert!(path.as_str().ends_with("app.xml"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::io::Write as _;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir as Utf8Dir};
use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct ConfigDir {
    _temp: TempDir,
    root: Utf8PathBuf,
    dir: Utf8Dir,
}

impl ConfigDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, its path is not
    /// valid UTF-8, or it cannot be opened with `cap-std`.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary directory path is not valid UTF-8: {path:?}"))?;
        let dir = Utf8Dir::open_ambient_dir(&root, ambient_authority())
            .context("open temporary directory with cap-std")?;
        Ok(Self {
            _temp: temp,
            root,
            dir,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `name` inside the directory and returns the full
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let mut file = self
            .dir
            .create(name)
            .with_context(|| format!("create {name}"))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write {name}"))?;
        Ok(self.root.join(name))
    }
}
