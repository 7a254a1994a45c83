use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::StorageError;
use crate::normalize::CanonicalRecord;

/// Writes record arrays as pretty-printed UTF-8 JSON files.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    base_path: PathBuf,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Stores `records` under `name` (which may contain subdirectories).
    /// An empty slice still produces a file holding `[]`.
    pub fn store(&self, name: &str, records: &[CanonicalRecord]) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');
        fs::write(&path, json)?;

        info!("Stored {} records in {}", records.len(), path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Vec<CanonicalRecord>, StorageError> {
        let text = fs::read_to_string(self.path_for(name))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Score;
    use tempfile::TempDir;

    fn record() -> CanonicalRecord {
        CanonicalRecord {
            home_team: "Borneo FC Samarinda".into(),
            home_logo: "https://img.example/b.png?w=128&h=128".into(),
            home_score: Score::Goals(2),
            away_team: "PSM Makassar".into(),
            away_logo: String::new(),
            away_score: Score::Goals(0),
            league_name: "BRI Liga 1 Indonésia".into(),
            league_logo: String::new(),
            league_round: "Pekan 17".into(),
            status: "Full Time".into(),
            match_date: "2026-01-08".into(),
            match_time: "15:30".into(),
            sort_instant: 0,
            link: "https://site.example/match/1".into(),
        }
    }

    #[test]
    fn writes_readable_unescaped_json() {
        let dir = TempDir::new().unwrap();
        let storage = DiskStorage::new(dir.path()).unwrap();
        let path = storage.store("nested/fixtures.json", &[record()]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n"));
        assert!(text.contains("BRI Liga 1 Indonésia"));
        assert!(text.ends_with("]\n"));
        assert_eq!(storage.load("nested/fixtures.json").unwrap(), vec![record()]);
    }

    #[test]
    fn empty_output_is_still_written() {
        let dir = TempDir::new().unwrap();
        let storage = DiskStorage::new(dir.path().join("out")).unwrap();
        let path = storage.store("fixtures.json", &[]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]\n");
    }
}
