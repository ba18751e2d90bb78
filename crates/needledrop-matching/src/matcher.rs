// SPDX-License-Identifier: GPL-3.0-or-later

use crate::normalize::normalize_name;
use thiserror::Error;
use tracing::{debug, warn};

/// Default fraction of the query length allowed as edit distance.
///
/// The acceptance threshold is `floor(ratio * query length)`; 0.5 means a
/// candidate may differ in at most half the query's characters.
pub const DEFAULT_MAX_DISTANCE_RATIO: f64 = 0.5;

#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("candidate set is empty")]
    EmptyCandidates,
}

/// Outcome of resolving one query against the candidate set.
///
/// Both variants carry the original candidate string, not its normalized
/// form. A rejection is a normal per-query outcome, never fatal to a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Accepted { candidate: String, distance: usize },
    Rejected { closest: String, distance: usize },
}

/// Resolve `query` to the closest candidate by normalized edit distance.
///
/// Ties at the minimum distance break to the candidate appearing first in
/// `candidates`; callers wanting deterministic results must supply a
/// deterministic order. The threshold is computed from the original,
/// un-normalized query length so that annotation stripping on the query
/// cannot loosen it.
pub fn match_name(
    query: &str,
    candidates: &[String],
    max_distance_ratio: f64,
) -> Result<MatchOutcome, MatchingError> {
    let max_distance_ratio = sanitize_ratio(max_distance_ratio);
    let normalized_query = normalize_name(query);

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let distance = levenshtein_distance(&normalized_query, &normalize_name(candidate));
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    let (closest, distance) = best.ok_or(MatchingError::EmptyCandidates)?;

    let threshold = (query.chars().count() as f64 * max_distance_ratio).floor() as usize;

    debug!(
        target: "matching",
        query,
        closest,
        distance,
        threshold,
        "nearest candidate selected"
    );

    if distance > threshold {
        Ok(MatchOutcome::Rejected {
            closest: closest.to_string(),
            distance,
        })
    } else {
        Ok(MatchOutcome::Accepted {
            candidate: closest.to_string(),
            distance,
        })
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if !ratio.is_finite() {
        warn!(target: "matching", ratio, "distance ratio is not finite, using default");
        return DEFAULT_MAX_DISTANCE_RATIO;
    }
    if ratio < 0.0 {
        warn!(target: "matching", ratio, "distance ratio is negative, clamping to 0.0");
        return 0.0;
    }
    ratio
}

/// Character-level Levenshtein distance between two strings.
pub fn levenshtein_distance(left: &str, right: &str) -> usize {
    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();

    if left_chars.is_empty() {
        return right_chars.len();
    }
    if right_chars.is_empty() {
        return left_chars.len();
    }

    let mut previous_row: Vec<usize> = (0..=right_chars.len()).collect();
    let mut current_row: Vec<usize> = vec![0; right_chars.len() + 1];

    for (left_index, left_char) in left_chars.iter().enumerate() {
        current_row[0] = left_index + 1;
        for (right_index, right_char) in right_chars.iter().enumerate() {
            let insert_cost = current_row[right_index] + 1;
            let delete_cost = previous_row[right_index + 1] + 1;
            let replace_cost = previous_row[right_index] + usize::from(left_char != right_char);
            current_row[right_index + 1] = insert_cost.min(delete_cost).min(replace_cost);
        }
        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row[right_chars.len()]
}
