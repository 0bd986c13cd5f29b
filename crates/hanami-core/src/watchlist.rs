use hanami_api::AnimeRecord;

use crate::error::HanamiError;
use crate::models::WatchlistEntry;
use crate::storage::WatchlistStorage;

/// Outcome of [`Watchlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Ordered, id-unique list of tracked anime, written through to storage.
///
/// Every mutation re-serializes the whole list. When the write fails the
/// in-memory list is restored and the error returned, so memory never runs
/// ahead of what was persisted.
pub struct Watchlist<S> {
    entries: Vec<WatchlistEntry>,
    storage: S,
}

impl<S: WatchlistStorage> Watchlist<S> {
    /// Load whatever the storage holds; unreadable data starts an empty list.
    pub fn open(storage: S) -> Self {
        let mut entries = storage.load();
        // Keep the first occurrence if the stored list was edited by hand.
        let mut seen = std::collections::HashSet::new();
        entries.retain(|e| seen.insert(e.id));
        tracing::debug!(count = entries.len(), "Opened watchlist");
        Self { entries, storage }
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append `anime` unless already tracked. Returns whether it was added.
    pub fn add(&mut self, anime: &AnimeRecord) -> Result<bool, HanamiError> {
        if self.contains(anime.id) {
            return Ok(false);
        }
        self.entries.push(WatchlistEntry::from(anime));
        if let Err(e) = self.storage.save(&self.entries) {
            self.entries.pop();
            return Err(e);
        }
        tracing::info!(id = anime.id, title = %anime.title, "Added to watchlist");
        Ok(true)
    }

    /// Drop the entry with `id`. Storage is rewritten even when nothing matched.
    pub fn remove(&mut self, id: u64) -> Result<bool, HanamiError> {
        let removed = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .map(|index| (index, self.entries.remove(index)));

        if let Err(e) = self.storage.save(&self.entries) {
            if let Some((index, entry)) = removed {
                self.entries.insert(index, entry);
            }
            return Err(e);
        }
        if removed.is_some() {
            tracing::info!(id, "Removed from watchlist");
        }
        Ok(removed.is_some())
    }

    pub fn toggle(&mut self, anime: &AnimeRecord) -> Result<Toggled, HanamiError> {
        if self.contains(anime.id) {
            self.remove(anime.id)?;
            Ok(Toggled::Removed)
        } else {
            self.add(anime)?;
            Ok(Toggled::Added)
        }
    }

    /// Empty the list. Returns how many entries were dropped.
    pub fn clear(&mut self) -> Result<usize, HanamiError> {
        let previous = std::mem::take(&mut self.entries);
        if let Err(e) = self.storage.save(&self.entries) {
            self.entries = previous;
            return Err(e);
        }
        tracing::info!(count = previous.len(), "Cleared watchlist");
        Ok(previous.len())
    }
}
