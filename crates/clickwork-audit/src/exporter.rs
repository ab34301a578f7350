//! Export economy-log data to various formats

use crate::{Error, Result};
use clickwork_core::EconomyEntry;
use serde::Serialize;
use std::io::Write;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RON format (Rust Object Notation)
    Ron,
    /// JSON format (requires serde_json feature)
    Json,
    /// CSV format
    Csv,
    /// Human-readable text format
    Text,
}

/// Exporter for economy-log data
pub struct Exporter<'a> {
    entries: &'a [EconomyEntry],
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(entries: &'a [EconomyEntry]) -> Self {
        Self { entries }
    }

    /// Export to a string in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Ron => self.to_ron(),
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(e.to_string()))?;
        Ok(())
    }

    /// Export to RON format
    pub fn to_ron(&self) -> Result<String> {
        let export = ExportData::from_entries(self.entries);
        ron::ser::to_string_pretty(&export, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export to JSON format
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        let export = ExportData::from_entries(self.entries);
        serde_json::to_string_pretty(&export).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::ExportError(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }

    /// Export to CSV format
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("at,player,kind,amount,meta\n");

        for entry in self.entries {
            let meta = entry
                .meta
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(";");
            let meta_escaped = meta.replace('"', "\"\"");

            output.push_str(&format!(
                "{},{},{},{},\"{}\"\n",
                entry.at.to_rfc3339(),
                entry.player.raw(),
                entry.kind,
                entry.amount,
                meta_escaped
            ));
        }

        output
    }

    /// Export to a human-readable text listing
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Economy log ({} entries)\n", self.entries.len()));
        for entry in self.entries {
            output.push_str(&format!(
                "  [{}] {} {:+} ({})\n",
                entry.at.format("%Y-%m-%d %H:%M:%S"),
                entry.player,
                entry.amount,
                entry.kind,
            ));
        }
        output
    }
}

/// Serializable export container
#[derive(Debug, Serialize)]
struct ExportData<'a> {
    entry_count: usize,
    entries: &'a [EconomyEntry],
}

impl<'a> ExportData<'a> {
    fn from_entries(entries: &'a [EconomyEntry]) -> Self {
        Self {
            entry_count: entries.len(),
            entries,
        }
    }
}
