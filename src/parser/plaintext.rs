use crate::error::IngestError;
use std::path::Path;

const BOM: char = '\u{feff}';

/// Decode raw bytes as UTF-8 text, dropping a leading byte-order mark.
pub fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, IngestError> {
    let text = String::from_utf8(bytes).map_err(|e| IngestError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}
