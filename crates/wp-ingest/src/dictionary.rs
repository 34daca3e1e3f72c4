//! Data dictionary loading.

use std::path::Path;

use csv::ReaderBuilder;
use wp_model::{DataDictionary, DictionaryEntry};

use crate::error::{IngestError, Result};

/// Header columns a dictionary file must carry.
pub const DICTIONARY_COLUMNS: [&str; 5] = [
    "directory",
    "file_name",
    "variable_name",
    "variable_type",
    "description",
];

/// Loads a dictionary CSV (`directory,file_name,variable_name,variable_type,description`).
pub fn read_dictionary(path: &Path) -> Result<DataDictionary> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::from_csv(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| IngestError::from_csv(path, e))?
        .clone();
    let missing: Vec<&str> = DICTIONARY_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header.trim_matches('\u{feff}') == *column))
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::DictionaryFormat {
            path: path.to_path_buf(),
            reason: format!("missing columns: {}", missing.join(", ")),
        });
    }

    let mut entries = Vec::new();
    for (idx, entry) in reader.deserialize::<DictionaryEntry>().enumerate() {
        let entry = entry.map_err(|e| IngestError::DictionaryFormat {
            path: path.to_path_buf(),
            reason: format!("row {}: {e}", idx + 1),
        })?;
        entries.push(entry);
    }
    Ok(DataDictionary::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_dictionary() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "directory,file_name,variable_name,variable_type,description\n\
             data/,waterpoints.csv,ph,numeric,pH of the sample\n\
             data/,waterpoints.csv,risk_level,character,\"Risk, by E. coli\"\n"
        )
        .unwrap();

        let dictionary = read_dictionary(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.entries[1].description, "Risk, by E. coli");
    }

    #[test]
    fn test_read_dictionary_missing_columns() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "variable_name,description\nph,pH\n").unwrap();

        let result = read_dictionary(file.path());
        assert!(matches!(result, Err(IngestError::DictionaryFormat { .. })));
    }
}
