//! Storage layer for atomic file operations.

mod atomic_file;

pub use atomic_file::{AtomicFile, FileFormat};

use pdna_core::error::{PdnaError, Result};

/// Runs blocking file I/O off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PdnaError::internal(format!("blocking task failed: {}", e)))?
}
