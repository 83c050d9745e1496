//! Filesystem access for configuration documents.

use std::sync::Arc;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::{StrataError, StrataResult};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Reads a document through a `cap-std` handle on its parent directory.
pub(crate) fn read_file(path: &Utf8Path) -> StrataResult<String> {
    let io_error = |source| {
        Arc::new(StrataError::Io {
            path: path.to_owned(),
            source,
        })
    };
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::other(
            "cannot determine file name for configuration file path",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}
