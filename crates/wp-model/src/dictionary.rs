//! Data dictionary entries describing the exported columns.

use serde::{Deserialize, Serialize};

use crate::schema::Column;

/// Directory the exports are published under, as listed in the dictionary.
pub const EXPORT_DIRECTORY: &str = "data/";

/// One dictionary row: `directory,file_name,variable_name,variable_type,description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub directory: String,
    pub file_name: String,
    pub variable_name: String,
    pub variable_type: String,
    pub description: String,
}

/// Ordered set of dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDictionary {
    pub entries: Vec<DictionaryEntry>,
}

impl DataDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    /// Dictionary for the schema as exported to `file_name`.
    pub fn from_schema(file_name: &str) -> Self {
        let entries = Column::ALL
            .iter()
            .map(|column| DictionaryEntry {
                directory: EXPORT_DIRECTORY.to_string(),
                file_name: file_name.to_string(),
                variable_name: column.as_str().to_string(),
                variable_type: column.kind().dictionary_label().to_string(),
                description: column.description().to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Entries describing `file_name`.
    pub fn entries_for<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a DictionaryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.file_name == file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
