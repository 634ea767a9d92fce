//! Attach the failing path to I/O errors.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O failure into [`ApplicationError::Io`] naming `action` and `path`.
    ///
    /// ```ignore
    /// fs.read_to_string(&path).with_path_context("read", &path)?;
    /// ```
    fn with_path_context(self, action: &'static str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &'static str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
