//! Head-to-head comparison between two participants
//!
//! Deltas follow the A − B sign convention throughout. Comparing a
//! participant against itself is tolerated and yields zero deltas; the
//! selection boundary above the engine is where distinct identifiers get
//! enforced.

use crate::aggregate::cohort_averages;
use crate::model::{Area, Evaluation};
use serde::Serialize;

/// Delta magnitude at which a difference gets directional treatment
pub const SIGNIFICANT_DELTA: f64 = 0.30;

/// Whether a delta crosses the significance threshold.
///
/// Scores carry two decimals, so the comparison happens in whole
/// hundredths; an exact 0.30 difference is significant even when the binary
/// subtraction lands a hair under it.
pub fn is_significant(delta: f64) -> bool {
    (delta.abs() * 100.0).round() as i64 >= (SIGNIFICANT_DELTA * 100.0).round() as i64
}

/// A-side and B-side values with their delta
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SidePair {
    pub a: f64,
    pub b: f64,
    pub delta: f64,
    pub significant: bool,
}

impl SidePair {
    fn new(a: f64, b: f64) -> Self {
        let delta = a - b;
        SidePair {
            a,
            b,
            delta,
            significant: is_significant(delta),
        }
    }

    const ZERO: SidePair = SidePair {
        a: 0.0,
        b: 0.0,
        delta: 0.0,
        significant: false,
    };
}

/// A participant's best-scoring rotation within the filtered set
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BestRotation {
    pub rotation: u32,
    pub score: f64,
}

impl BestRotation {
    const NONE: BestRotation = BestRotation {
        rotation: 0,
        score: 0.0,
    };
}

/// Per-area comparison row, with the cohort average as a baseline
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaComparison {
    pub area: Area,
    pub a: f64,
    pub b: f64,
    pub delta: f64,
    pub significant: bool,
    pub cohort: f64,
}

/// Full head-to-head view model
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub overall: SidePair,
    pub best_rotation_a: BestRotation,
    pub best_rotation_b: BestRotation,
    /// Canonical area order; empty in the degenerate nothing-to-compare case
    pub by_area: Vec<AreaComparison>,
}

impl Comparison {
    /// Degenerate zero-filled result for "nothing to compare yet"
    fn empty() -> Self {
        Comparison {
            overall: SidePair::ZERO,
            best_rotation_a: BestRotation::NONE,
            best_rotation_b: BestRotation::NONE,
            by_area: Vec::new(),
        }
    }
}

/// Best-scoring evaluation; the earliest one wins an exact tie
fn best_rotation(rows: &[&Evaluation]) -> BestRotation {
    let mut best: Option<&Evaluation> = None;
    for eval in rows.iter().copied() {
        if best.map_or(true, |b| eval.overall > b.overall) {
            best = Some(eval);
        }
    }
    best.map(|e| BestRotation {
        rotation: e.rotation,
        score: e.overall,
    })
    .unwrap_or(BestRotation::NONE)
}

/// Compare two participants over a filtered evaluation sequence.
///
/// Overall and per-area figures come from each side's latest evaluation
/// (last in sequence order); best rotation scans each side's whole filtered
/// history. Either side empty yields the degenerate zero-filled result.
pub fn compare(rows: &[Evaluation], a: &str, b: &str) -> Comparison {
    let a_rows: Vec<&Evaluation> = rows.iter().filter(|e| e.mdp_name == a).collect();
    let b_rows: Vec<&Evaluation> = rows.iter().filter(|e| e.mdp_name == b).collect();

    let (Some(latest_a), Some(latest_b)) = (a_rows.last(), b_rows.last()) else {
        return Comparison::empty();
    };

    let averages = cohort_averages(rows);
    let by_area = Area::ALL
        .into_iter()
        .map(|area| {
            let pair = SidePair::new(latest_a.area_score(area), latest_b.area_score(area));
            AreaComparison {
                area,
                a: pair.a,
                b: pair.b,
                delta: pair.delta,
                significant: pair.significant,
                cohort: averages.by_area.get(&area).copied().unwrap_or(0.0),
            }
        })
        .collect();

    Comparison {
        overall: SidePair::new(latest_a.overall, latest_b.overall),
        best_rotation_a: best_rotation(&a_rows),
        best_rotation_b: best_rotation(&b_rows),
        by_area,
    }
}
