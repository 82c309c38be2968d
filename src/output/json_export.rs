//! JSON export functionality

use crate::metrics::Summary;
use anyhow::Result;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    /// Export the summary as a list of objects keyed by column name
    pub fn export_summary(summary: &Summary, path: &Path) -> Result<()> {
        let rows: Vec<Value> = summary
            .rows
            .iter()
            .map(|row| {
                let means: Map<String, Value> = summary
                    .columns
                    .iter()
                    .zip(&row.means)
                    .map(|(name, mean)| (name.clone(), json!(mean)))
                    .collect();

                json!({
                    "tree_type": row.tree_type,
                    "sortedness": row.sortedness,
                    "read_ratio": row.read_ratio,
                    "trials": row.trials,
                    "means": means,
                })
            })
            .collect();

        let output = json!({
            "columns": summary.columns,
            "rows": rows,
        });

        let mut file = File::create(path)?;
        file.write_all(serde_json::to_string_pretty(&output)?.as_bytes())?;

        Ok(())
    }
}
