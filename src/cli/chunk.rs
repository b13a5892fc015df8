use anyhow::Result;
use std::path::Path;

use legis_embed::config::LegisConfig;
use legis_embed::corpus::chunker::chunk_directory;

/// Split every `.txt` document in `input_dir` into chunk files in `output_dir`.
pub fn chunk(
    config: &LegisConfig,
    input_dir: &Path,
    output_dir: &Path,
    size: Option<usize>,
) -> Result<()> {
    let chunk_size = size.unwrap_or(config.chunking.chunk_size);
    let written = chunk_directory(input_dir, output_dir, chunk_size)?;
    println!("Wrote {written} chunk files to {}", output_dir.display());
    Ok(())
}
