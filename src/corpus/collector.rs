//! Directory walk that turns chunk files into line-level [`TextRecord`]s.

use std::path::Path;

use super::filename::decode_filename;
use super::TextRecord;
use crate::error::EmbedError;

/// Collect one [`TextRecord`] per non-empty line of every decodable file in `dir`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Only direct entries are visited.
/// Subdirectories and files whose names do not decode are skipped without
/// error. Entries are visited in file-name order so record positions are
/// stable across runs.
pub fn collect_records(dir: &Path) -> Result<Vec<TextRecord>, EmbedError> {
    if !dir.is_dir() {
        return Err(EmbedError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(meta) = name.to_str().and_then(decode_filename) else {
            tracing::debug!(file = %path.display(), "skipping file with undecodable name");
            skipped += 1;
            continue;
        };

        let contents = std::fs::read_to_string(&path)?;
        let before = records.len();
        records.extend(
            contents
                .split(['\n', '\r'])
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| TextRecord::new(line, &meta)),
        );
        tracing::debug!(
            file = %path.display(),
            lines = records.len() - before,
            "collected chunk file"
        );
    }

    tracing::info!(
        dir = %dir.display(),
        records = records.len(),
        skipped,
        "collected text records"
    );

    if records.is_empty() {
        return Err(EmbedError::NoValidTexts);
    }
    Ok(records)
}
