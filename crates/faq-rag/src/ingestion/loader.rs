//! Source document loader

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Document;

/// Read the whole FAQ file into a [`Document`].
///
/// Missing, unreadable and non-UTF-8 files all surface as
/// [`Error::FileAccess`].
pub async fn load_document(path: &Path) -> Result<Document> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::file_access(path, e))?;

    tracing::debug!("Loaded {} ({} bytes)", path.display(), content.len());

    Ok(Document::new(path, content))
}
