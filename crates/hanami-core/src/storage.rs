use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::HanamiError;
use crate::models::WatchlistEntry;

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "animeWatchlist";

/// Durable home of the serialized watchlist.
///
/// `load` never fails: absent or unreadable data is an empty watchlist.
/// `save` overwrites the whole list and reports failures to the caller.
pub trait WatchlistStorage {
    fn load(&self) -> Vec<WatchlistEntry>;
    fn save(&self, entries: &[WatchlistEntry]) -> Result<(), HanamiError>;
}

impl<T: WatchlistStorage + ?Sized> WatchlistStorage for Box<T> {
    fn load(&self) -> Vec<WatchlistEntry> {
        (**self).load()
    }

    fn save(&self, entries: &[WatchlistEntry]) -> Result<(), HanamiError> {
        (**self).save(entries)
    }
}

fn decode(raw: &str, source: &str) -> Vec<WatchlistEntry> {
    match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(source, error = %e, "Ignoring malformed watchlist data");
            Vec::new()
        }
    }
}

// ── JSON file ───────────────────────────────────────────────────

/// One JSON file per storage key: `<dir>/<key>.json`.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl WatchlistStorage for JsonFileStorage {
    fn load(&self) -> Vec<WatchlistEntry> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let entries = decode(&raw, "file");
                tracing::debug!(path = %self.path.display(), count = entries.len(), "Loaded watchlist");
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No watchlist file yet");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not read watchlist");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[WatchlistEntry]) -> Result<(), HanamiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(entries)?;

        // Rename over the target so a failed write leaves the old file intact.
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "Saved watchlist");
        Ok(())
    }
}

// ── In memory ───────────────────────────────────────────────────

/// Keeps the serialized list in memory. Writes can be made to fail.
#[derive(Default)]
pub struct MemoryStorage {
    raw: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-serialized value, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The stored value, exactly as the next `load` would read it.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl WatchlistStorage for MemoryStorage {
    fn load(&self) -> Vec<WatchlistEntry> {
        match self.raw() {
            Some(raw) => decode(&raw, "memory"),
            None => Vec::new(),
        }
    }

    fn save(&self, entries: &[WatchlistEntry]) -> Result<(), HanamiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HanamiError::Storage("quota exceeded".into()));
        }
        let json = serde_json::to_string(entries)?;
        *self.raw.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hanami_api::{AnimeRecord, Genre, StreamingLink};

    use super::*;
    use crate::models::Score;

    fn sample() -> Vec<WatchlistEntry> {
        let mut a = AnimeRecord::new(1, "Cowboy Bebop");
        a.score = Some(8.75);
        a.image_url = Some("https://cdn.myanimelist.net/images/anime/4/19644.jpg".into());
        a.genres = vec![Genre::new(1, "Action"), Genre::new(24, "Sci-Fi")];
        a.streaming = vec![StreamingLink {
            name: "Crunchyroll".into(),
            url: Some("http://www.crunchyroll.com/".into()),
        }];
        let b = AnimeRecord::new(52991, "Sousou no Frieren");
        vec![WatchlistEntry::from(&a), WatchlistEntry::from(&b)]
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested"), DEFAULT_KEY);
        assert!(storage.load().is_empty());

        let entries = sample();
        storage.save(&entries).unwrap();
        assert!(storage.path().ends_with("nested/animeWatchlist.json"));
        assert_eq!(storage.load(), entries);
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_file_malformed_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path(), DEFAULT_KEY);
        std::fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().is_empty());

        std::fs::write(storage.path(), r#"{"mal_id": 1}"#).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_file_save_failure_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path(), DEFAULT_KEY);
        let entries = sample();
        storage.save(&entries).unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(storage.temp_path()).unwrap();
        assert!(storage.save(&[]).is_err());
        assert_eq!(storage.load(), entries);
    }

    #[test]
    fn test_reads_legacy_browser_value() {
        let raw = r#"[
            {"mal_id":21,"title":"One Piece","image":"https://cdn.myanimelist.net/images/anime/6/73245.jpg","score":8.72,"genres":[{"mal_id":1,"name":"Action"}],"streaming":[]},
            {"mal_id":59999,"title":"Untitled Sequel","image":"images/placeholder.jpg","score":"N/A","genres":[],"streaming":[{"name":"Netflix","url":"https://www.netflix.com/"}]}
        ]"#;
        let storage = MemoryStorage::with_raw(raw);
        let entries = storage.load();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].score, Score::Rated(8.72));
        assert_eq!(entries[1].score, Score::Unknown);
        assert_eq!(entries[1].image, "images/placeholder.jpg");
    }

    #[test]
    fn test_entry_missing_fields_keeps_whole_list() {
        let raw = r#"[
            {"mal_id":21,"title":"One Piece","image":"https://cdn.myanimelist.net/images/anime/6/73245.jpg","score":8.72},
            {"mal_id":30,"score":"N/A"}
        ]"#;
        let entries = MemoryStorage::with_raw(raw).load();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "One Piece");
        assert_eq!(entries[1].id, 30);
        assert_eq!(entries[1].image, "images/placeholder.jpg");
    }

    #[test]
    fn test_memory_round_trip_and_unknown_score_format() {
        let storage = MemoryStorage::new();
        assert!(storage.raw().is_none());

        let entries = sample();
        storage.save(&entries).unwrap();
        assert_eq!(storage.load(), entries);
        assert!(storage.raw().unwrap().contains(r#""score":"N/A""#));
    }

    #[test]
    fn test_memory_failed_write_keeps_previous_value() {
        let storage = MemoryStorage::new();
        storage.save(&sample()).unwrap();
        let before = storage.raw();

        storage.set_fail_writes(true);
        let err = storage.save(&[]).unwrap_err();
        assert!(matches!(err, HanamiError::Storage(_)));
        assert_eq!(storage.raw(), before);
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let storage: Box<dyn WatchlistStorage> = Box::new(MemoryStorage::new());
        storage.save(&sample()).unwrap();
        assert_eq!(storage.load().len(), 2);
    }
}
