//! CLI `validate` command — print a structural report for a dataset file.

use anyhow::Result;
use std::path::Path;

use legis_embed::config::LegisConfig;
use legis_embed::dataset::validate::validate_dataset;

/// Check every entry of `file` and print the report. Bad entries do not fail the command.
pub fn validate(config: &LegisConfig, file: &Path) -> Result<()> {
    let report = validate_dataset(file, config.dataset.dimensions)?;
    print!("{report}");
    if report.is_clean() {
        println!("All {} entries OK.", report.checked);
    }
    Ok(())
}
