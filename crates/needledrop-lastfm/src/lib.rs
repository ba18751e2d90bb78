// SPDX-License-Identifier: GPL-3.0-or-later

//! Last.fm API client for fetching a user's listening charts.
//!
//! This crate wraps the handful of `user.*` chart methods needed to build
//! a wantlist, with built-in rate limiting, plus the aggregation step that
//! merges several chart periods and deduplicates artist/album pairs.

pub mod chart;
pub mod client;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use chart::{collect_top_albums, dedup_chart_albums, DEFAULT_PERIOD_SCHEDULE};
pub use client::{LastFmClient, Period};
pub use error::{LastFmError, Result};
pub use models::{
    ChartAlbum, ChartArtist, ChartArtistEntry, TopAlbumsResponse, TopArtistsResponse,
    WeeklyArtistChartResponse,
};
