//! Consistency check between a data dictionary and the exported schema.

use std::collections::BTreeMap;

use tracing::warn;
use wp_model::{Column, ColumnKind, DataDictionary, DictionaryEntry};

use crate::issue::DictionaryIssue;

/// Check the entries for `file_name` against the exported columns.
///
/// Issues are reported in column order, followed by entries that match no
/// column.
pub fn check_dictionary(dictionary: &DataDictionary, file_name: &str) -> Vec<DictionaryIssue> {
    let mut by_name: BTreeMap<&str, Vec<&DictionaryEntry>> = BTreeMap::new();
    for entry in dictionary.entries_for(file_name) {
        by_name
            .entry(entry.variable_name.trim())
            .or_default()
            .push(entry);
    }
    if by_name.is_empty() {
        let issue = DictionaryIssue::NoEntries {
            file_name: file_name.to_string(),
        };
        warn!("{issue}");
        return vec![issue];
    }

    let mut issues = Vec::new();
    for column in Column::ALL {
        let Some(entries) = by_name.remove(column.as_str()) else {
            issues.push(DictionaryIssue::Undocumented {
                column: column.as_str().to_string(),
            });
            continue;
        };
        if entries.len() > 1 {
            issues.push(DictionaryIssue::DuplicateEntry {
                variable: column.as_str().to_string(),
                count: entries.len(),
            });
        }
        for entry in entries {
            if ColumnKind::from_dictionary_label(&entry.variable_type) != Some(column.kind()) {
                issues.push(DictionaryIssue::TypeMismatch {
                    variable: column.as_str().to_string(),
                    expected: column.kind().dictionary_label().to_string(),
                    found: entry.variable_type.clone(),
                });
            }
        }
    }
    for variable in by_name.into_keys() {
        issues.push(DictionaryIssue::UnknownVariable {
            variable: variable.to_string(),
        });
    }

    for issue in &issues {
        warn!(variable = issue.variable().unwrap_or(""), "{issue}");
    }
    issues
}
