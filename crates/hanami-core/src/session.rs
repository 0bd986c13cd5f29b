//! Per-session view state: the last listing, request sequencing and the
//! one-record handoff slot between a listing and its detail view.

use std::sync::atomic::{AtomicU64, Ordering};

use hanami_api::{AnimeRecord, Catalog, CatalogError};

use crate::filter::AnimeFilter;

/// Identifies one dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets; only the newest one is current.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Which query produced the current results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    Search,
    Upcoming,
}

#[derive(Debug, Default)]
pub struct Session {
    sequence: RequestSequence,
    listing: Listing,
    results: Vec<AnimeRecord>,
    handoff: Option<AnimeRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&self) -> RequestTicket {
        self.sequence.begin()
    }

    /// Store `records` as the current listing unless a newer request was
    /// started after `ticket`. Returns whether they were kept.
    pub fn accept_results(
        &mut self,
        ticket: RequestTicket,
        listing: Listing,
        records: Vec<AnimeRecord>,
    ) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!(?ticket, "Discarding stale response");
            return false;
        }
        self.listing = listing;
        self.results = records;
        true
    }

    pub fn listing(&self) -> Listing {
        self.listing
    }

    pub fn results(&self) -> &[AnimeRecord] {
        &self.results
    }

    pub fn find_result(&self, id: u64) -> Option<&AnimeRecord> {
        self.results.iter().find(|a| a.id == id)
    }

    pub fn filtered(&self, filter: &AnimeFilter) -> Vec<AnimeRecord> {
        filter.apply(&self.results)
    }

    /// Put `anime` in the handoff slot, replacing anything already there.
    pub fn hand_off(&mut self, anime: AnimeRecord) {
        self.handoff = Some(anime);
    }

    /// Hand off the listed record with `id`, if the current listing has it.
    pub fn stash_for_detail(&mut self, id: u64) -> bool {
        match self.find_result(id).cloned() {
            Some(anime) => {
                self.hand_off(anime);
                true
            }
            None => false,
        }
    }

    /// Take the handed-off record if it is the one asked for. A different
    /// record stays in the slot.
    pub fn take_handoff(&mut self, id: u64) -> Option<AnimeRecord> {
        if self.handoff.as_ref().is_some_and(|a| a.id == id) {
            self.handoff.take()
        } else {
            None
        }
    }

    /// Detail record for `id`, served from the handoff slot when it holds it.
    pub async fn detail<C: Catalog>(
        &mut self,
        id: u64,
        catalog: &C,
    ) -> Result<AnimeRecord, CatalogError> {
        if let Some(anime) = self.take_handoff(id) {
            tracing::debug!(id, "Using handed-off record");
            return Ok(anime);
        }
        catalog.get_by_id(id).await
    }

    /// Run a search and keep its results as the current listing.
    pub async fn search<C: Catalog>(
        &mut self,
        catalog: &C,
        query: Option<&str>,
        limit: u32,
    ) -> Result<&[AnimeRecord], CatalogError> {
        let ticket = self.begin_request();
        let records = catalog.search(query, limit).await?;
        self.accept_results(ticket, Listing::Search, records);
        Ok(&self.results)
    }

    /// Fetch upcoming titles and keep them as the current listing.
    pub async fn upcoming<C: Catalog>(
        &mut self,
        catalog: &C,
        limit: u32,
    ) -> Result<&[AnimeRecord], CatalogError> {
        let ticket = self.begin_request();
        let records = catalog.upcoming(limit).await?;
        self.accept_results(ticket, Listing::Upcoming, records);
        Ok(&self.results)
    }
}
