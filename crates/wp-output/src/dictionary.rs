//! Data dictionary CSV export.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use wp_model::DataDictionary;

/// Writes the dictionary as CSV
/// (`directory,file_name,variable_name,variable_type,description`).
pub fn write_dictionary_csv(dictionary: &DataDictionary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_dictionary(dictionary, file).with_context(|| format!("write {}", path.display()))
}

/// Writes the dictionary as CSV to any writer.
pub fn write_dictionary<W: Write>(dictionary: &DataDictionary, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in &dictionary.entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_dictionary() {
        let dictionary = DataDictionary::from_schema("waterpoints.csv");
        let mut buffer = Vec::new();
        write_dictionary(&dictionary, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("directory,file_name,variable_name,variable_type,description")
        );
        assert_eq!(text.lines().count(), dictionary.len() + 1);
        assert!(text.contains("data/,waterpoints.csv,ph,numeric,"));
    }
}
