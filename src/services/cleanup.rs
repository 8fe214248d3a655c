//! Source file cleanup

use std::path::Path;

use tracing::warn;

/// Delete the uploaded source file, best effort. A missing file is fine;
/// any other failure is logged and never escalated to the caller.
pub async fn reap_source(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to delete source file {}: {}", path.display(), err);
        }
    }
}
