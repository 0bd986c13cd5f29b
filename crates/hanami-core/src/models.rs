pub mod score;
pub mod watchlist;

pub use score::Score;
pub use watchlist::{WatchlistEntry, PLACEHOLDER_IMAGE};
