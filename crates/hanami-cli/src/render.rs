//! Plain-text views of catalog records and watchlist entries.

use hanami_api::{AnimeRecord, StreamingLink};
use hanami_core::models::{Score, WatchlistEntry};
use hanami_core::recommend::GenreCount;

const SYNOPSIS_PREVIEW_CHARS: usize = 250;

fn rating(score: Option<f64>) -> String {
    format!("{}/10", Score::from(score))
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>, fallback: &str) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

fn marker(in_watchlist: bool) -> &'static str {
    if in_watchlist {
        "[*]"
    } else {
        "[ ]"
    }
}

/// Cut to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Search result card.
pub fn card(anime: &AnimeRecord, in_watchlist: bool) -> String {
    let episodes = anime
        .episodes
        .map(|e| e.to_string())
        .unwrap_or_else(|| "N/A".into());
    format!(
        "{} #{:<6} {}\n    Episodes: {}  Rating: {}",
        marker(in_watchlist),
        anime.id,
        anime.display_title(),
        episodes,
        rating(anime.score),
    )
}

/// Full detail view for a record fetched by id.
pub fn detail(anime: &AnimeRecord, in_watchlist: bool) -> String {
    let mut out = format!("{}  (#{})\n", anime.title, anime.id);
    if let Some(english) = anime.title_english.as_deref().filter(|t| *t != anime.title) {
        out.push_str(&format!("{english}\n"));
    }
    out.push('\n');
    out.push_str(&format!(
        "Status:   {}\n",
        anime.status.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!(
        "Episodes: {}\n",
        anime
            .episodes
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown".into())
    ));
    out.push_str(&format!(
        "Aired:    {}\n",
        anime.aired.as_deref().unwrap_or("Not specified")
    ));
    out.push_str(&format!("Rating:   {}\n", rating(anime.score)));
    out.push_str(&format!(
        "Genres:   {}\n",
        join_names(anime.genres.iter().map(|g| g.name.as_str()), "Not specified")
    ));
    out.push_str(&format!(
        "Studios:  {}\n",
        join_names(anime.studios.iter().map(|s| s.name.as_str()), "Not specified")
    ));
    out.push_str(&format!("\nSynopsis\n{}\n\n", synopsis(anime)));
    out.push_str(if in_watchlist {
        "On your watchlist."
    } else {
        "Not on your watchlist."
    });
    out
}

/// Detail view for an upcoming title, built from the listing record.
pub fn upcoming_detail(anime: &AnimeRecord) -> String {
    let status = anime.status.as_deref().unwrap_or("Upcoming");
    let mut out = format!(
        "{}  (#{})\n[{}] {}\n\n",
        anime.display_title(),
        anime.id,
        status,
        anime.season_label().unwrap_or_else(|| "TBA".into())
    );
    let rows = [
        ("Status", status.to_string()),
        (
            "Type",
            anime.media_type.clone().unwrap_or_else(|| "Unknown".into()),
        ),
        (
            "Release",
            anime.aired.clone().unwrap_or_else(|| "Not announced".into()),
        ),
        (
            "Source",
            anime.source.clone().unwrap_or_else(|| "Unknown".into()),
        ),
        (
            "Genres",
            join_names(anime.genres.iter().map(|g| g.name.as_str()), "Not specified"),
        ),
        (
            "Studios",
            join_names(anime.studios.iter().map(|s| s.name.as_str()), "Not specified"),
        ),
        (
            "Rating",
            anime.rating.clone().unwrap_or_else(|| "Not rated".into()),
        ),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{:<9} {value}\n", format!("{label}:")));
    }
    out.push_str(&format!("\nSynopsis\n{}", synopsis(anime)));
    out
}

fn synopsis(anime: &AnimeRecord) -> &str {
    anime
        .synopsis
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("No synopsis available.")
}

/// Card for the upcoming listing, with a shortened synopsis.
pub fn upcoming_card(anime: &AnimeRecord) -> String {
    let synopsis = anime
        .synopsis
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("No description available.");
    format!(
        "#{:<6} {} [{}]\n    {} | {}\n    {}",
        anime.id,
        anime.display_title(),
        anime.status.as_deref().unwrap_or("Upcoming"),
        anime.season_label().unwrap_or_else(|| "TBA".into()),
        join_names(anime.genres.iter().map(|g| g.name.as_str()), "Unknown"),
        truncate(synopsis, SYNOPSIS_PREVIEW_CHARS),
    )
}

/// First two services, then "+N" for the rest.
pub fn streaming_summary(streaming: &[StreamingLink]) -> String {
    if streaming.is_empty() {
        return "Streaming: Not available".into();
    }
    let names = streaming
        .iter()
        .take(2)
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match streaming.len() {
        n if n > 2 => format!("Streaming: {names} +{}", n - 2),
        _ => format!("Streaming: {names}"),
    }
}

pub fn watchlist_row(entry: &WatchlistEntry) -> String {
    format!(
        "#{:<6} {}\n    {}/10  {}",
        entry.id,
        entry.title,
        entry.score,
        streaming_summary(&entry.streaming)
    )
}

pub fn recommendation_card(anime: &AnimeRecord) -> String {
    let mut out = format!(
        "#{:<6} {}  {}",
        anime.id,
        anime.display_title(),
        rating(anime.score)
    );
    let genres = anime
        .genres
        .iter()
        .take(2)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if !genres.is_empty() {
        out.push_str(&format!("\n    {genres}"));
    }
    out
}

/// "Action (3), Drama (2), Comedy (1)" for the top `limit` genres.
pub fn top_genres(ranking: &[GenreCount], limit: usize) -> String {
    ranking
        .iter()
        .take(limit)
        .map(|c| format!("{} ({})", c.genre.name, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}
