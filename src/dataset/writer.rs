use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::DatasetEntry;
use crate::corpus::TextRecord;
use crate::error::EmbedError;

/// Zip records with their vectors; `id` is the position in the batch.
pub fn build_entries(
    records: Vec<TextRecord>,
    vectors: Vec<Vec<f32>>,
) -> Result<Vec<DatasetEntry>, EmbedError> {
    if records.len() != vectors.len() {
        return Err(EmbedError::LengthMismatch {
            records: records.len(),
            vectors: vectors.len(),
        });
    }

    Ok(records
        .into_iter()
        .zip(vectors)
        .enumerate()
        .map(|(idx, (payload, vector))| DatasetEntry {
            id: idx as u64,
            vector,
            payload,
        })
        .collect())
}

/// Where the dataset for `input_dir` goes: next to it, in its parent directory.
pub fn output_path_for(input_dir: &Path, file_name: &str) -> PathBuf {
    match input_dir.parent() {
        Some(parent) => parent.join(file_name),
        None => input_dir.join(file_name),
    }
}

/// Write `entries` as a pretty-printed JSON array, replacing any existing file.
///
/// Non-ASCII text is written as-is. Each call stages into its own uniquely
/// named file next to `path` and renames it into place, so concurrent writers
/// to the same path never share a staging file; the last rename wins.
pub fn write_dataset(path: &Path, entries: &[DatasetEntry]) -> Result<(), EmbedError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
    }
    staged.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), entries = entries.len(), "dataset written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FileMeta;
    use tempfile::TempDir;

    fn record(text: &str) -> TextRecord {
        let meta = FileMeta {
            year: 2005,
            law: "Lege/2005".into(),
            code: "123".into(),
            main_id: "05lege123".into(),
            chunk: 1,
        };
        TextRecord::new(text, &meta)
    }

    #[test]
    fn ids_are_dense_positions() {
        let entries = build_entries(
            vec![record("a"), record("b"), record("c")],
            vec![vec![0.1], vec![0.2], vec![0.3]],
        )
        .unwrap();

        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, [0, 1, 2]);
        assert_eq!(entries[1].payload.text, "b");
        assert_eq!(entries[1].vector, vec![0.2]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = build_entries(vec![record("a")], vec![]).unwrap_err();
        assert!(matches!(
            err,
            EmbedError::LengthMismatch {
                records: 1,
                vectors: 0
            }
        ));
    }

    #[test]
    fn output_goes_to_parent_directory() {
        assert_eq!(
            output_path_for(Path::new("/data/chunked_output"), "embeddings.json"),
            PathBuf::from("/data/embeddings.json")
        );
        assert_eq!(
            output_path_for(Path::new("chunks"), "embeddings.json"),
            PathBuf::from("embeddings.json")
        );
    }

    #[test]
    fn writes_pretty_utf8_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("embeddings.json");
        std::fs::write(&path, "stale").unwrap();

        let entries = build_entries(vec![record("Hotărârea Guvernului")], vec![vec![0.5, 1.0]]).unwrap();
        write_dataset(&path, &entries).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Hotărârea Guvernului"), "non-ASCII kept literally");
        assert!(written.starts_with("[\n  {"), "two-space pretty printing");
        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["embeddings.json"], "staging file is renamed away");

        let parsed: Vec<DatasetEntry> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn concurrent_writes_to_one_path_all_land() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("embeddings.json");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let texts: Vec<TextRecord> = (0..50).map(|n| record(&format!("{i}-{n}"))).collect();
                    let vectors = vec![vec![i as f32; 16]; 50];
                    let entries = build_entries(texts, vectors).unwrap();
                    write_dataset(&path, &entries)
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let parsed: Vec<DatasetEntry> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 50);
        let writer = parsed[0].vector[0];
        assert!(parsed.iter().all(|e| e.vector == vec![writer; 16]), "one writer's output, not a mix");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
