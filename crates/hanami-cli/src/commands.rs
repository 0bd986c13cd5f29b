use std::io::{BufRead, Write};

use hanami_api::{AnimeRecord, AnimeSeason, Catalog, CatalogError};
use hanami_core::config::AppConfig;
use hanami_core::error::HanamiError;
use hanami_core::filter::AnimeFilter;
use hanami_core::recommend::{genre_ranking, Recommendations, Recommender};
use hanami_core::session::{Listing, Session};
use hanami_core::storage::WatchlistStorage;
use hanami_core::watchlist::{Toggled, Watchlist};

use crate::args::Command;
use crate::console::{Console, Loading};
use crate::render;

pub const SEARCH_FAILED: &str = "Error loading anime. Please try again.";
pub const NO_RESULTS: &str = "No anime found. Try a different search.";
pub const DETAIL_FAILED: &str = "Error loading anime details. Please try again.";
pub const UPCOMING_FAILED: &str = "Error loading upcoming anime. Please try again.";
pub const NO_UPCOMING: &str = "No upcoming anime available at this time.";
pub const NEED_MORE_DATA: &str = "Add more anime to your watchlist for better recommendations.";
pub const NO_RECOMMENDATIONS: &str = "No new recommendations available at this time.";
pub const RECOMMEND_FAILED: &str = "Error loading recommendations. Please try again.";
pub const EMPTY_WATCHLIST: &str = "Your watchlist is empty.";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your entire watchlist?";

/// Everything a command needs: catalog, watchlist and the session's view state.
pub struct App<C> {
    config: AppConfig,
    catalog: C,
    watchlist: Watchlist<Box<dyn WatchlistStorage>>,
    recommender: Recommender,
    session: Session,
    /// Records from the last `recommend`, so `recommend --add` needs no lookup.
    recommended: Vec<AnimeRecord>,
}

impl<C: Catalog> App<C> {
    pub fn new(config: AppConfig, catalog: C, storage: Box<dyn WatchlistStorage>) -> Self {
        let recommender = Recommender::from_config(&config.recommendations);
        Self {
            config,
            catalog,
            watchlist: Watchlist::open(storage),
            recommender,
            session: Session::new(),
            recommended: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn watchlist(&self) -> &Watchlist<Box<dyn WatchlistStorage>> {
        &self.watchlist
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Run one command. Catalog failures are reported on the console;
    /// storage and console failures are returned.
    pub async fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        match command {
            Command::Search { query, filter } => {
                self.search(query.join(" "), filter.into(), console).await?
            }
            Command::Filter { filter } => self.filter(&filter.into(), console)?,
            Command::Show { id } => self.show(id, console).await?,
            Command::Upcoming => self.upcoming(console).await?,
            Command::Watchlist => self.list(console)?,
            Command::Add { id } => self.add(id, console).await?,
            Command::Remove { id } => self.remove(id, console)?,
            Command::Toggle { id } => self.toggle(id, console).await?,
            Command::Clear { yes } => self.clear(yes, console)?,
            Command::Recommend { add } => self.recommend(add, console).await?,
            Command::Shell => console.line("Already in the interactive shell.")?,
        }
        Ok(())
    }

    async fn search<R: BufRead, W: Write>(
        &mut self,
        query: String,
        filter: AnimeFilter,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        let query = query.trim();
        let fetched = {
            let _loading = Loading::start("Searching");
            self.session
                .search(
                    &self.catalog,
                    Some(query).filter(|q| !q.is_empty()),
                    self.config.catalog.search_limit,
                )
                .await
                .map(|records| filter.apply(records))
        };

        match fetched {
            Ok(records) => {
                if query.is_empty() {
                    console.line(format!("Airing this season ({})", AnimeSeason::current_label()))?;
                }
                self.print_cards(&records, console)?;
            }
            Err(e) => {
                tracing::error!(error = %e, "Search failed");
                console.line(SEARCH_FAILED)?;
            }
        }
        Ok(())
    }

    fn filter<R: BufRead, W: Write>(
        &self,
        filter: &AnimeFilter,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        if self.session.results().is_empty() {
            console.line("Nothing to filter yet. Run a search first.")?;
            return Ok(());
        }
        let records = self.session.filtered(filter);
        self.print_cards(&records, console)
    }

    fn print_cards<R: BufRead, W: Write>(
        &self,
        records: &[AnimeRecord],
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        if records.is_empty() {
            console.line(NO_RESULTS)?;
            return Ok(());
        }
        for anime in records {
            console.line(render::card(anime, self.watchlist.contains(anime.id)))?;
        }
        Ok(())
    }

    async fn show<R: BufRead, W: Write>(
        &mut self,
        id: u64,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        // Upcoming titles open from the listing record without another request.
        let handed_off =
            self.session.listing() == Listing::Upcoming && self.session.stash_for_detail(id);

        let fetched = {
            let _loading = (!handed_off).then(|| Loading::start("Loading anime details"));
            self.session.detail(id, &self.catalog).await
        };

        match fetched {
            Ok(anime) if handed_off => console.line(render::upcoming_detail(&anime))?,
            Ok(anime) => console.line(render::detail(&anime, self.watchlist.contains(anime.id)))?,
            Err(e) => {
                tracing::error!(id, error = %e, "Detail lookup failed");
                console.line(DETAIL_FAILED)?;
            }
        }
        Ok(())
    }

    async fn upcoming<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        let fetched = {
            let _loading = Loading::start("Loading upcoming anime");
            self.session
                .upcoming(&self.catalog, self.config.catalog.upcoming_limit)
                .await
                .map(<[AnimeRecord]>::to_vec)
        };

        match fetched {
            Ok(records) if records.is_empty() => console.line(NO_UPCOMING)?,
            Ok(records) => {
                for anime in &records {
                    console.line(render::upcoming_card(anime))?;
                    console.blank()?;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Upcoming listing failed");
                console.line(UPCOMING_FAILED)?;
            }
        }
        Ok(())
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<(), HanamiError> {
        if self.watchlist.is_empty() {
            console.line(EMPTY_WATCHLIST)?;
            return Ok(());
        }
        for entry in self.watchlist.entries() {
            console.line(render::watchlist_row(entry))?;
        }
        let ranking = genre_ranking(self.watchlist.entries());
        if !ranking.is_empty() {
            console.blank()?;
            console.line(format!("Top genres: {}", render::top_genres(&ranking, 3)))?;
        }
        Ok(())
    }

    /// The record for `id`: from the current listing or the last
    /// recommendations when present, else fetched.
    async fn resolve(&self, id: u64) -> Result<AnimeRecord, CatalogError> {
        let known = self
            .session
            .find_result(id)
            .or_else(|| self.recommended.iter().find(|a| a.id == id));
        if let Some(anime) = known {
            return Ok(anime.clone());
        }
        let _loading = Loading::start("Loading anime details");
        self.catalog.get_by_id(id).await
    }

    async fn resolve_or_report<R: BufRead, W: Write>(
        &self,
        id: u64,
        console: &mut Console<R, W>,
    ) -> Result<Option<AnimeRecord>, HanamiError> {
        match self.resolve(id).await {
            Ok(anime) => Ok(Some(anime)),
            Err(e) => {
                tracing::error!(id, error = %e, "Detail lookup failed");
                console.line(DETAIL_FAILED)?;
                Ok(None)
            }
        }
    }

    async fn add<R: BufRead, W: Write>(
        &mut self,
        id: u64,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        if let Some(entry) = self.watchlist.get(id) {
            console.line(format!("{} is already on your watchlist.", entry.title))?;
            return Ok(());
        }
        let Some(anime) = self.resolve_or_report(id, console).await? else {
            return Ok(());
        };
        self.watchlist.add(&anime)?;
        console.line(format!("Added {} to your watchlist.", anime.title))?;
        Ok(())
    }

    fn remove<R: BufRead, W: Write>(
        &mut self,
        id: u64,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        let title = self.watchlist.get(id).map(|e| e.title.clone());
        self.watchlist.remove(id)?;
        match title {
            Some(title) => console.line(format!("Removed {title} from your watchlist."))?,
            None => console.line(format!("#{id} is not on your watchlist."))?,
        }
        Ok(())
    }

    async fn toggle<R: BufRead, W: Write>(
        &mut self,
        id: u64,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        let anime = match self.watchlist.get(id) {
            Some(entry) => AnimeRecord::new(entry.id, entry.title.clone()),
            None => match self.resolve_or_report(id, console).await? {
                Some(anime) => anime,
                None => return Ok(()),
            },
        };
        match self.watchlist.toggle(&anime)? {
            Toggled::Added => console.line(format!("Added {} to your watchlist.", anime.title))?,
            Toggled::Removed => {
                console.line(format!("Removed {} from your watchlist.", anime.title))?
            }
        }
        Ok(())
    }

    fn clear<R: BufRead, W: Write>(
        &mut self,
        yes: bool,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        if !yes && !console.confirm(CLEAR_PROMPT)? {
            console.line("Watchlist left unchanged.")?;
            return Ok(());
        }
        let removed = self.watchlist.clear()?;
        console.line(format!("Cleared {removed} entries from your watchlist."))?;
        Ok(())
    }

    async fn recommend<R: BufRead, W: Write>(
        &mut self,
        add: Option<u64>,
        console: &mut Console<R, W>,
    ) -> Result<(), HanamiError> {
        if let Some(entry) = add.and_then(|id| self.watchlist.get(id)) {
            console.line(format!("{} is already on your watchlist.", entry.title))?;
        }

        let outcome = match add.filter(|id| !self.watchlist.contains(*id)) {
            Some(id) => {
                let Some(anime) = self.resolve_or_report(id, console).await? else {
                    return Ok(());
                };
                let outcome = {
                    let _loading = Loading::start("Loading recommendations");
                    self.recommender
                        .add_and_refresh(&mut self.watchlist, &self.catalog, &anime)
                        .await
                };
                match outcome {
                    Ok((added, recs)) => {
                        if added {
                            console.line(format!("Added {} to your watchlist.", anime.title))?;
                        }
                        Ok(recs)
                    }
                    Err(HanamiError::Catalog(e)) => Err(e),
                    Err(e) => return Err(e),
                }
            }
            None => {
                let _loading = Loading::start("Loading recommendations");
                self.recommender.recommend(&self.watchlist, &self.catalog).await
            }
        };

        self.recommended = match &outcome {
            Ok(Recommendations::Found(records)) => records.clone(),
            _ => Vec::new(),
        };

        match outcome {
            Ok(Recommendations::InsufficientData) => console.line(NEED_MORE_DATA)?,
            Ok(Recommendations::Found(records)) if records.is_empty() => {
                console.line(NO_RECOMMENDATIONS)?
            }
            Ok(Recommendations::Found(records)) => {
                if let Some(top) = genre_ranking(self.watchlist.entries()).first() {
                    console.line(format!("Because you like {}:", top.genre.name))?;
                }
                for anime in &records {
                    console.line(render::recommendation_card(anime))?;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Recommendations failed");
                console.line(RECOMMEND_FAILED)?;
            }
        }
        Ok(())
    }
}
