//! Export artifact types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The three export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Arrow,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Arrow, ExportFormat::Csv, ExportFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Arrow => "arrow",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportFormat::Arrow => "Arrow IPC",
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "XLSX",
        };
        f.write_str(label)
    }
}

/// Paths of the export artifacts for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPaths {
    pub arrow: PathBuf,
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

impl ExportPaths {
    /// `<dir>/<name>.arrow|csv|xlsx`.
    pub fn for_dataset(output_dir: &Path, name: &str) -> Self {
        let path = |format: ExportFormat| output_dir.join(format!("{name}.{}", format.extension()));
        Self {
            arrow: path(ExportFormat::Arrow),
            csv: path(ExportFormat::Csv),
            xlsx: path(ExportFormat::Xlsx),
        }
    }

    pub fn get(&self, format: ExportFormat) -> &Path {
        match format {
            ExportFormat::Arrow => &self.arrow,
            ExportFormat::Csv => &self.csv,
            ExportFormat::Xlsx => &self.xlsx,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExportFormat, &Path)> {
        ExportFormat::ALL
            .into_iter()
            .map(move |format| (format, self.get(format)))
    }
}

/// Shape of one artifact as read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCheck {
    pub format: ExportFormat,
    pub rows: usize,
    pub columns: usize,
}
