//! CSV export functionality

use crate::metrics::Summary;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Export the per-configuration summary to a CSV file
    pub fn export_summary(summary: &Summary, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        // Write headers
        let mut header = vec!["TreeType", "Sortedness", "ReadRatio", "Trials"];
        header.extend(summary.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        // Write data rows; empty cells where no trial had a value
        for row in &summary.rows {
            let mut record = vec![
                row.tree_type.clone(),
                row.sortedness.to_string(),
                row.read_ratio.to_string(),
                row.trials.to_string(),
            ];
            record.extend(
                row.means
                    .iter()
                    .map(|m| m.map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
