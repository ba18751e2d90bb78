// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Artist reference as embedded in chart entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartArtist {
    /// Artist name as credited by Last.fm.
    pub name: String,
    /// MusicBrainz ID, empty string when Last.fm has none.
    #[serde(default)]
    pub mbid: Option<String>,
}

/// One album entry from a top-albums chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartAlbum {
    /// Album title.
    pub name: String,
    /// Credited artist.
    pub artist: ChartArtist,
    /// Scrobble count; Last.fm serializes numbers as strings here.
    #[serde(default)]
    pub playcount: Option<String>,
}

/// One artist entry from a top-artists or weekly chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartArtistEntry {
    /// Artist name.
    pub name: String,
    /// Scrobble count; Last.fm serializes numbers as strings here.
    #[serde(default)]
    pub playcount: Option<String>,
}

/// Envelope for `user.gettopalbums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAlbumsResponse {
    pub topalbums: TopAlbums,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAlbums {
    #[serde(default)]
    pub album: Vec<ChartAlbum>,
}

/// Envelope for `user.gettopartists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub topartists: TopArtists,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtists {
    #[serde(default)]
    pub artist: Vec<ChartArtistEntry>,
}

/// Envelope for `user.getweeklyartistchart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyArtistChartResponse {
    pub weeklyartistchart: WeeklyArtistChart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyArtistChart {
    #[serde(default)]
    pub artist: Vec<ChartArtistEntry>,
}
