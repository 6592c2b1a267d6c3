// File: src/persistence.rs
use crate::error::{PhoneError, Result};
use crate::index::PhoneticIndex;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Bumped whenever the glyph tables or the index layout change, since stored
/// keys would no longer match freshly encoded ones.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Writes the index atomically: the payload goes to a temporary file next to
/// `path` which then replaces it.
///
/// The file is the format version as a bincode `u32`, followed by the index.
pub fn save_to_disk(index: &PhoneticIndex, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(temp_file.as_file());
    bincode::serialize_into(&mut writer, &INDEX_FORMAT_VERSION)?;
    bincode::serialize_into(&mut writer, index)?;
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), words = index.len(), "index saved");
    Ok(())
}

/// Reads an index back. The version is checked before the payload is
/// decoded, and the decoded index is checked for dangling word ids.
pub fn load_from_disk(path: &Path) -> Result<PhoneticIndex> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let version: u32 = bincode::deserialize_from(&mut reader)?;
    if version != INDEX_FORMAT_VERSION {
        return Err(PhoneError::IndexVersion {
            found: version,
            expected: INDEX_FORMAT_VERSION,
        });
    }

    let index: PhoneticIndex = bincode::deserialize_from(&mut reader)?;
    index.validate()?;
    info!(path = %path.display(), words = index.len(), "index loaded");
    Ok(index)
}
