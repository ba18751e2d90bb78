// SPDX-License-Identifier: GPL-3.0-or-later

//! Aggregation of several chart periods into one deduplicated album list.

use crate::client::{LastFmClient, Period};
use crate::error::Result;
use crate::models::ChartAlbum;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

lazy_static! {
    // Any "feat." in the name is almost certainly the track artist, not the
    // album artist.
    static ref FEATURED_CREDIT: Regex =
        Regex::new(r"(?i) feat\.? .*").expect("featured credit regex is valid");
    // "with" and "vs." usually belong to the track artist too, but can be
    // part of a real album artist (e.g. We Butter the Bread with Butter),
    // so the stripped form is emitted as an extra variant, not a
    // replacement.
    static ref GUEST_CREDIT: Regex =
        Regex::new(r"(?i) (with|vs\.?) .*").expect("guest credit regex is valid");
}

/// Chart periods polled per run, with per-period entry limits.
///
/// Recent periods get proportionally more entries so short-lived listening
/// spikes still make it into the wantlist.
pub const DEFAULT_PERIOD_SCHEDULE: [(Period, u32); 5] = [
    (Period::TwelveMonths, 150),
    (Period::SixMonths, 200),
    (Period::ThreeMonths, 250),
    (Period::OneMonth, 250),
    (Period::SevenDays, 100),
];

/// Fetch top albums for every period in `schedule` and concatenate them.
pub async fn collect_top_albums(
    client: &LastFmClient,
    user: &str,
    schedule: &[(Period, u32)],
) -> Result<Vec<ChartAlbum>> {
    let mut collected = Vec::new();
    for (period, limit) in schedule {
        let response = client.user_top_albums(user, *period, *limit, 1).await?;
        let albums = response.topalbums.album;
        debug!(
            target: "lastfm",
            period = period.as_str(),
            count = albums.len(),
            "fetched top albums"
        );
        collected.extend(albums);
    }
    Ok(collected)
}

/// Deduplicate chart albums into (artist, album) pairs.
///
/// Featured-artist credits are stripped from the artist name; "with"/"vs."
/// credits produce an additional stripped variant alongside the original.
/// Pairs are sorted case-insensitively by artist, then album.
pub fn dedup_chart_albums(albums: &[ChartAlbum]) -> Vec<(String, String)> {
    let mut pairs = HashSet::new();

    for album in albums {
        let artist = FEATURED_CREDIT
            .replace(&album.artist.name, "")
            .into_owned();
        pairs.insert((artist.clone(), album.name.clone()));

        let stripped = GUEST_CREDIT.replace(&artist, "").into_owned();
        if stripped != artist {
            pairs.insert((stripped, album.name.clone()));
        }
    }

    let mut deduped: Vec<(String, String)> = pairs.into_iter().collect();
    deduped.sort_by_key(|(artist, album)| (artist.to_lowercase(), album.to_lowercase()));
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartArtist;

    fn album(artist: &str, name: &str) -> ChartAlbum {
        ChartAlbum {
            name: name.to_string(),
            artist: ChartArtist {
                name: artist.to_string(),
                mbid: None,
            },
            playcount: None,
        }
    }

    #[test]
    fn featured_credit_is_stripped() {
        let deduped = dedup_chart_albums(&[album("Artist feat. Guest", "Album")]);
        assert_eq!(deduped, vec![("Artist".to_string(), "Album".to_string())]);
    }

    #[test]
    fn featured_credit_without_dot_is_stripped() {
        let deduped = dedup_chart_albums(&[album("Artist Feat Someone", "Album")]);
        assert_eq!(deduped, vec![("Artist".to_string(), "Album".to_string())]);
    }

    #[test]
    fn guest_credit_keeps_both_variants() {
        let deduped = dedup_chart_albums(&[album(
            "We Butter the Bread with Butter",
            "Das Monster aus dem Schrank",
        )]);
        assert_eq!(
            deduped,
            vec![
                (
                    "We Butter the Bread".to_string(),
                    "Das Monster aus dem Schrank".to_string()
                ),
                (
                    "We Butter the Bread with Butter".to_string(),
                    "Das Monster aus dem Schrank".to_string()
                ),
            ]
        );
    }

    #[test]
    fn versus_credit_keeps_both_variants() {
        let deduped = dedup_chart_albums(&[album("A vs. B", "Split")]);
        assert_eq!(
            deduped,
            vec![
                ("A".to_string(), "Split".to_string()),
                ("A vs. B".to_string(), "Split".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_entries_collapse() {
        let deduped = dedup_chart_albums(&[
            album("Autechre", "Amber"),
            album("Autechre", "Amber"),
            album("Autechre feat. Nobody", "Amber"),
        ]);
        assert_eq!(deduped, vec![("Autechre".to_string(), "Amber".to_string())]);
    }

    #[test]
    fn output_sorts_case_insensitively() {
        let deduped = dedup_chart_albums(&[
            album("burial", "Untrue"),
            album("Aphex Twin", "Drukqs"),
            album("Boards of Canada", "Geogaddi"),
        ]);
        let artists: Vec<&str> = deduped.iter().map(|(artist, _)| artist.as_str()).collect();
        assert_eq!(artists, vec!["Aphex Twin", "Boards of Canada", "burial"]);
    }
}
