//! Recent sessions, persisted as a JSON array newest-first.

use crate::config::{Config, Language};
use crate::error::HistoryError;
use crate::{AnalysisResult, TextError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const HISTORY_FILE: &str = "history.json";
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub original_text: String,
    pub corrected_text: String,
    pub analysis: AnalysisResult,
    pub errors: Vec<TextError>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub preview: String,
    pub language: Language,
}

impl HistoryEntry {
    pub fn new(
        original_text: &str,
        corrected_text: String,
        analysis: AnalysisResult,
        errors: Vec<TextError>,
        language: Language,
    ) -> Self {
        let timestamp = Utc::now().timestamp_millis();
        Self {
            id: timestamp.to_string(),
            original_text: original_text.to_string(),
            corrected_text,
            analysis,
            errors,
            timestamp,
            preview: preview(original_text),
            language,
        }
    }
}

/// First `PREVIEW_CHARS` chars, with an ellipsis when something was cut.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store in the user data directory.
    pub fn open(config: &Config) -> Result<Self, HistoryError> {
        let dir = Config::data_dir().ok_or(HistoryError::NoDataDir)?;
        Self::open_at(dir.join(HISTORY_FILE), config.max_history_entries)
    }

    /// Open the store backed by `path`. A missing file is an empty history;
    /// an unreadable one is logged and treated as empty.
    pub fn open_at(path: PathBuf, capacity: usize) -> Result<Self, HistoryError> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| HistoryError::Io {
                path: path.clone(),
                source,
            })?;
            match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "discarding corrupt history: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            capacity,
            entries,
        })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Prepend `entry`, drop the oldest past capacity and save. Returns
    /// `false` without touching the store when the text is blank. An id
    /// already in the store gets a `-N` suffix.
    pub fn record(&mut self, mut entry: HistoryEntry) -> Result<bool, HistoryError> {
        if entry.original_text.trim().is_empty() {
            return Ok(false);
        }

        if self.get(&entry.id).is_some() {
            let base = entry.id.clone();
            let mut n = 1;
            while self.get(&format!("{}-{}", base, n)).is_some() {
                n += 1;
            }
            entry.id = format!("{}-{}", base, n);
        }

        tracing::debug!(id = %entry.id, "recording history entry");
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        self.save()?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<HistoryEntry, HistoryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        let removed = self.entries.remove(index);
        self.save()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<(), HistoryError> {
        let io_err = |source| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze, find_errors};
    use tempfile::tempdir;

    fn entry(id: &str, text: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            original_text: text.to_string(),
            corrected_text: text.to_string(),
            analysis: analyze(text),
            errors: find_errors(text),
            timestamp: 0,
            preview: preview(text),
            language: Language::En,
        }
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short");
        let long = "я".repeat(120);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview(&"x".repeat(100)), "x".repeat(100));
    }

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(HISTORY_FILE);

        let mut store = HistoryStore::open_at(path.clone(), 10).unwrap();
        assert!(store.entries().is_empty());
        assert!(store.record(entry("1", "домй бьло")).unwrap());
        assert!(store.record(entry("2", "second")).unwrap());

        let reloaded = HistoryStore::open_at(path, 10).unwrap();
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.entries()[0].id, "2");
        assert_eq!(reloaded.get("1").unwrap().errors.len(), 2);
    }

    #[test]
    fn test_capacity_keeps_newest() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join(HISTORY_FILE), 3).unwrap();
        for i in 0..5 {
            store.record(entry(&i.to_string(), "text")).unwrap();
        }
        let ids: Vec<_> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_blank_text_is_not_recorded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        let mut store = HistoryStore::open_at(path.clone(), 10).unwrap();
        assert!(!store.record(entry("1", "  \n ")).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_and_clear() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join(HISTORY_FILE), 10).unwrap();
        store.record(entry("1", "one")).unwrap();
        store.record(entry("2", "two")).unwrap();

        assert_eq!(store.delete("1").unwrap().original_text, "one");
        assert!(matches!(store.delete("1"), Err(HistoryError::NotFound(_))));
        assert_eq!(store.entries().len(), 1);

        store.clear().unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_same_millisecond_ids_stay_unique() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join(HISTORY_FILE), 10).unwrap();
        store.record(entry("1700000000000", "first")).unwrap();
        store.record(entry("1700000000000", "second")).unwrap();
        store.record(entry("1700000000000", "third")).unwrap();

        let ids: Vec<_> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1700000000000-2", "1700000000000-1", "1700000000000"]);

        store.delete("1700000000000").unwrap();
        assert_eq!(store.entries().len(), 2);
        assert!(store.get("1700000000000").is_none());
        assert_eq!(store.get("1700000000000-1").unwrap().original_text, "second");
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(HistoryStore::open_at(path, 10).unwrap().entries().is_empty());
    }
}
