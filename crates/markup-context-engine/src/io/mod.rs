use crate::models::Dialect;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot tell the language of {0}; pass one explicitly")]
    UnknownLanguage(PathBuf),
}

/// A source file loaded for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub language_id: String,
}

/// Read a source file, taking its language from `language_id` or, failing
/// that, from its extension.
pub fn read_source(path: &Path, language_id: Option<&str>) -> Result<SourceFile, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let language_id = match language_id {
        Some(id) => id.to_string(),
        None => Dialect::language_id_for_path(path)
            .ok_or_else(|| IoError::UnknownLanguage(path.to_path_buf()))?
            .to_string(),
    };

    let text = fs::read_to_string(path)?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        text,
        language_id,
    })
}
