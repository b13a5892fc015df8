//! Split whole plain-text documents into numbered chunk files.
//!
//! Output files are named `<stem>_chunk<N>.txt` with `N` starting at 1, which is
//! the shape [`decode_filename`](super::filename::decode_filename) expects.
//! Each chunk is written as a single line.

use std::path::Path;

use anyhow::{Context, Result};

/// Cut `text` into pieces of at most `chunk_size` characters.
///
/// Line breaks become spaces and the text is trimmed first. When a cut would
/// land inside the text, it moves back to just after the last space in the
/// window, provided that space is past the window start.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    let chars: Vec<char> = flattened.trim().chars().collect();
    let chunk_size = chunk_size.max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + chunk_size).min(chars.len());
        if end < chars.len() {
            if let Some(space) = chars[start..end].iter().rposition(|&c| c == ' ') {
                if space > 0 {
                    end = start + space + 1;
                }
            }
        }
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }
    chunks
}

/// Chunk every `*.txt` file directly inside `input_dir` into `output_dir`.
///
/// Returns the number of chunk files written.
pub fn chunk_directory(input_dir: &Path, output_dir: &Path, chunk_size: usize) -> Result<usize> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create directory {}", output_dir.display()))?;

    let mut sources: Vec<_> = std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to read directory {}", input_dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    sources.sort();

    let mut written = 0;
    for path in sources {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let chunks = split_text(&text, chunk_size);
        for (i, chunk) in chunks.iter().enumerate() {
            let out = output_dir.join(format!("{stem}_chunk{}.txt", i + 1));
            std::fs::write(&out, chunk)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        tracing::info!(file = %path.display(), chunks = chunks.len(), "chunked document");
        written += chunks.len();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cuts_after_last_space_in_window() {
        let chunks = split_text("aaa bbb ccc", 6);
        assert_eq!(chunks, ["aaa ", "bbb ", "ccc"]);
    }

    #[test]
    fn hard_cut_when_no_space() {
        let chunks = split_text("abcdefghij", 4);
        assert_eq!(chunks, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn flattens_line_breaks() {
        let chunks = split_text("  Art. 1\r\nAlin. 2\nAlin. 3\r  ", 1000);
        assert_eq!(chunks, ["Art. 1 Alin. 2 Alin. 3"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_text("   \n ", 10).is_empty());
    }

    #[test]
    fn chunk_directory_writes_decodable_names() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("05lege123.txt"), "unu doi trei patru").unwrap();
        std::fs::write(input.path().join("readme.md"), "ignored").unwrap();

        let written = chunk_directory(input.path(), output.path(), 9).unwrap();

        assert_eq!(written, 3);
        let first = std::fs::read_to_string(output.path().join("05lege123_chunk1.txt")).unwrap();
        assert_eq!(first, "unu doi ");
        let meta = crate::corpus::filename::decode_filename("05lege123_chunk3.txt").unwrap();
        assert_eq!(meta.chunk, 3);
        assert!(output.path().join("05lege123_chunk3.txt").exists());
    }
}
