/// Category directory: maps category ids to human-readable account names.
///
/// The directory and the model's label set are maintained separately and may drift, so a
/// lookup miss is normal and callers substitute a placeholder.
use std::collections::HashMap;

use serde::Deserialize;

use crate::api::CategoryId;

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    names: HashMap<CategoryId, String>,
}

impl CategoryDirectory {
    /// Build a directory from entries. Later duplicates override earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        let names = entries.into_iter().map(|e| (e.id, e.name)).collect();
        Self { names }
    }

    pub fn name(&self, id: &CategoryId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_entries_override_earlier() {
        let entries: Vec<DirectoryEntry> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Production"},
                {"id": "CC002", "name": "Raw Materials"},
                {"id": 1, "name": "Production Floor"}
            ]"#,
        )
        .unwrap();
        let dir = CategoryDirectory::from_entries(entries);

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.name(&CategoryId::Int(1)), Some("Production Floor"));
        assert_eq!(dir.name(&CategoryId::from("CC002")), Some("Raw Materials"));
        assert_eq!(dir.name(&CategoryId::Int(2)), None);
    }

    #[test]
    fn int_and_text_ids_are_distinct() {
        let dir = CategoryDirectory::from_entries(vec![DirectoryEntry {
            id: CategoryId::Int(5),
            name: "Marketing".to_string(),
        }]);
        assert_eq!(dir.name(&CategoryId::from("5")), None);
    }
}
