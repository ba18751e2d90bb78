// SPDX-License-Identifier: GPL-3.0-or-later

//! Artist name resolution against a fixed candidate set.
//!
//! Names are compared after normalization (parenthetical annotations such
//! as "(Remastered)" stripped, lowercased), using character-level
//! Levenshtein distance. The closest candidate is accepted only when its
//! distance stays within a configurable fraction of the query length;
//! anything farther is reported as a rejection with the closest candidate
//! kept for diagnostics.

pub mod matcher;
pub mod normalize;

pub use matcher::{
    levenshtein_distance, match_name, MatchOutcome, MatchingError, DEFAULT_MAX_DISTANCE_RATIO,
};
pub use normalize::normalize_name;
