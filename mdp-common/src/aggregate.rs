//! Cohort aggregation: averages, rankings, extrema
//!
//! Every function here is a pure derivation over an already-filtered
//! evaluation slice; callers compose `CohortFilter` with these to build the
//! dashboard view models. Averages are left unrounded; formatting belongs
//! to the presentation boundary.

use crate::model::{Area, Evaluation, Function};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Averages across one filtered cohort
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CohortAverages {
    /// Mean of `overall` across all evaluations (0 if empty)
    pub overall: f64,
    /// Mean of each area's score, keyed in canonical area order
    pub by_area: BTreeMap<Area, f64>,
    /// Mean of `overall` grouped by rotation number
    pub by_rotation: BTreeMap<u32, f64>,
}

/// Mean of `overall` plus per-area and per-rotation means
pub fn cohort_averages(rows: &[Evaluation]) -> CohortAverages {
    if rows.is_empty() {
        return CohortAverages {
            overall: 0.0,
            by_area: BTreeMap::new(),
            by_rotation: BTreeMap::new(),
        };
    }

    let count = rows.len() as f64;
    let overall = rows.iter().map(|e| e.overall).sum::<f64>() / count;

    let mut by_area = BTreeMap::new();
    for area in Area::ALL {
        let mean = rows.iter().map(|e| e.area_score(area)).sum::<f64>() / count;
        by_area.insert(area, mean);
    }

    let mut rotation_groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for eval in rows {
        rotation_groups
            .entry(eval.rotation)
            .or_default()
            .push(eval.overall);
    }
    let by_rotation = rotation_groups
        .into_iter()
        .map(|(rotation, overalls)| {
            let mean = overalls.iter().sum::<f64>() / overalls.len() as f64;
            (rotation, mean)
        })
        .collect();

    CohortAverages {
        overall,
        by_area,
        by_rotation,
    }
}

/// Tie-aware top performer over each participant's latest evaluation.
///
/// Exact ties on the maximum report every tied name rather than picking one
/// arbitrarily.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    /// Leading participants in first-appearance order; empty for an empty cohort
    pub names: Vec<String>,
    pub score: f64,
    pub is_tied: bool,
}

pub fn top_performer(rows: &[Evaluation]) -> TopPerformer {
    // Latest evaluation per participant; a strictly later submission wins,
    // so the first record keeps a timestamp tie.
    let mut latest: Vec<&Evaluation> = Vec::new();
    for eval in rows {
        match latest.iter_mut().find(|e| e.mdp_name == eval.mdp_name) {
            Some(entry) => {
                if eval.submitted_at > entry.submitted_at {
                    *entry = eval;
                }
            }
            None => latest.push(eval),
        }
    }

    if latest.is_empty() {
        return TopPerformer {
            names: Vec::new(),
            score: 0.0,
            is_tied: false,
        };
    }

    let max = latest.iter().map(|e| e.overall).fold(f64::MIN, f64::max);
    // Stored scores carry two decimals, so exact equality is meaningful here
    let names: Vec<String> = latest
        .iter()
        .filter(|e| e.overall == max)
        .map(|e| e.mdp_name.clone())
        .collect();

    TopPerformer {
        is_tied: names.len() > 1,
        score: max,
        names,
    }
}

/// Strength and development areas derived from a by-area average map
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AreaExtrema {
    pub strength: Area,
    pub development: Area,
}

/// Maximum and minimum areas; ties break toward the earlier area in
/// canonical order. `None` when the map is empty.
pub fn area_extrema(by_area: &BTreeMap<Area, f64>) -> Option<AreaExtrema> {
    let mut strength: Option<(Area, f64)> = None;
    let mut development: Option<(Area, f64)> = None;

    for area in Area::ALL {
        let Some(&score) = by_area.get(&area) else {
            continue;
        };
        if strength.map_or(true, |(_, best)| score > best) {
            strength = Some((area, score));
        }
        if development.map_or(true, |(_, worst)| score < worst) {
            development = Some((area, score));
        }
    }

    match (strength, development) {
        (Some((strength, _)), Some((development, _))) => Some(AreaExtrema {
            strength,
            development,
        }),
        _ => None,
    }
}

/// One row of the per-participant cohort table
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRollup {
    pub mdp_name: String,
    pub rotation_count: usize,
    pub average_overall: f64,
    /// Distinct functions attempted, in first-attempt order
    pub functions: Vec<Function>,
    pub last_submitted: DateTime<Utc>,
    /// 1-based rank by descending mean overall
    pub standing: usize,
}

/// Group evaluations by participant and rank by mean overall, descending.
/// Rank ties keep the participants' first-appearance order.
pub fn participant_rollup(rows: &[Evaluation]) -> Vec<ParticipantRollup> {
    let mut groups: Vec<(&str, Vec<&Evaluation>)> = Vec::new();
    for eval in rows {
        match groups.iter_mut().find(|(name, _)| *name == eval.mdp_name) {
            Some((_, evals)) => evals.push(eval),
            None => groups.push((&eval.mdp_name, vec![eval])),
        }
    }

    let mut rollups: Vec<ParticipantRollup> = groups
        .into_iter()
        .map(|(name, evals)| {
            let average_overall =
                evals.iter().map(|e| e.overall).sum::<f64>() / evals.len() as f64;

            let mut functions = Vec::new();
            for eval in &evals {
                if !functions.contains(&eval.function_name) {
                    functions.push(eval.function_name);
                }
            }

            let last_submitted = evals
                .iter()
                .map(|e| e.submitted_at)
                .max()
                .unwrap_or_else(Utc::now);

            ParticipantRollup {
                mdp_name: name.to_string(),
                rotation_count: evals.len(),
                average_overall,
                functions,
                last_submitted,
                standing: 0,
            }
        })
        .collect();

    // Stable sort: equal averages keep first-appearance order
    rollups.sort_by(|a, b| {
        b.average_overall
            .partial_cmp(&a.average_overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (index, rollup) in rollups.iter_mut().enumerate() {
        rollup.standing = index + 1;
    }

    rollups
}

/// One rotation of one participant's history, for trend views
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotationPoint {
    pub rotation: u32,
    pub function: Function,
    pub overall: f64,
    pub by_area: BTreeMap<Area, f64>,
}

/// A participant's evaluations as a rotation-ordered series
pub fn participant_series(rows: &[Evaluation], mdp_name: &str) -> Vec<RotationPoint> {
    let mut points: Vec<RotationPoint> = rows
        .iter()
        .filter(|e| e.mdp_name == mdp_name)
        .map(|e| RotationPoint {
            rotation: e.rotation,
            function: e.function_name,
            overall: e.overall,
            by_area: Area::ALL
                .into_iter()
                .map(|area| (area, e.area_score(area)))
                .collect(),
        })
        .collect();
    points.sort_by_key(|p| p.rotation);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Responses;
    use chrono::TimeZone;

    fn eval_at(
        mdp: &str,
        function: Function,
        rotation: u32,
        overall: f64,
        day: u32,
    ) -> Evaluation {
        Evaluation {
            id: format!("{}-{}", mdp, rotation),
            mdp_name: mdp.into(),
            function_name: function,
            manager: "Test Manager".into(),
            rotation,
            responses: Responses::new(),
            job_knowledge: overall,
            quality_of_work: overall,
            communication: overall,
            initiative: overall,
            overall,
            submitted_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
            email_response: false,
            respondent_email: None,
        }
    }

    #[test]
    fn test_empty_cohort_averages_are_zero() {
        let averages = cohort_averages(&[]);
        assert_eq!(averages.overall, 0.0);
        assert!(averages.by_area.is_empty());
        assert!(averages.by_rotation.is_empty());
    }

    #[test]
    fn test_cohort_overall_average() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 4.0, 1),
            eval_at("Amy Lee", Function::Planning, 1, 3.0, 2),
        ];
        let averages = cohort_averages(&rows);
        assert_eq!(averages.overall, 3.5);
        assert_eq!(averages.by_area[&Area::JobKnowledge], 3.5);
    }

    #[test]
    fn test_by_rotation_groups_means() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 4.0, 1),
            eval_at("Amy Lee", Function::Replenishment, 1, 2.0, 2),
            eval_at("Jane Doe", Function::DigitalMerch, 2, 5.0, 3),
        ];
        let averages = cohort_averages(&rows);
        assert_eq!(averages.by_rotation[&1], 3.0);
        assert_eq!(averages.by_rotation[&2], 5.0);
    }

    #[test]
    fn test_top_performer_uses_latest_evaluation() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 5.0, 1),
            eval_at("Jane Doe", Function::DigitalMerch, 2, 3.0, 5),
            eval_at("Amy Lee", Function::Planning, 1, 4.0, 2),
        ];
        // Jane's latest is 3.0, so Amy leads
        let top = top_performer(&rows);
        assert_eq!(top.names, vec!["Amy Lee".to_string()]);
        assert_eq!(top.score, 4.0);
        assert!(!top.is_tied);
    }

    #[test]
    fn test_top_performer_reports_all_tied_names() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 4.5, 1),
            eval_at("Amy Lee", Function::Planning, 1, 4.5, 2),
            eval_at("Bob Ray", Function::Planning, 1, 4.5, 3),
            eval_at("Cal Poe", Function::Planning, 1, 4.2, 4),
        ];
        let top = top_performer(&rows);
        assert!(top.is_tied);
        assert_eq!(top.score, 4.5);
        assert_eq!(
            top.names,
            vec![
                "Jane Doe".to_string(),
                "Amy Lee".to_string(),
                "Bob Ray".to_string()
            ]
        );
    }

    #[test]
    fn test_top_performer_empty_cohort() {
        let top = top_performer(&[]);
        assert!(top.names.is_empty());
        assert_eq!(top.score, 0.0);
        assert!(!top.is_tied);
    }

    #[test]
    fn test_area_extrema_ties_break_by_canonical_order() {
        let by_area: BTreeMap<Area, f64> = [
            (Area::JobKnowledge, 4.0),
            (Area::QualityOfWork, 4.0),
            (Area::Communication, 3.0),
            (Area::Initiative, 3.0),
        ]
        .into_iter()
        .collect();

        let extrema = area_extrema(&by_area).unwrap();
        assert_eq!(extrema.strength, Area::JobKnowledge);
        assert_eq!(extrema.development, Area::Communication);
    }

    #[test]
    fn test_area_extrema_empty_map() {
        assert_eq!(area_extrema(&BTreeMap::new()), None);
    }

    #[test]
    fn test_rollup_groups_and_ranks() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 4.0, 1),
            eval_at("Amy Lee", Function::Planning, 1, 5.0, 2),
            eval_at("Jane Doe", Function::DigitalMerch, 2, 2.0, 3),
        ];
        let rollups = participant_rollup(&rows);

        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].mdp_name, "Amy Lee");
        assert_eq!(rollups[0].standing, 1);
        assert_eq!(rollups[0].rotation_count, 1);

        assert_eq!(rollups[1].mdp_name, "Jane Doe");
        assert_eq!(rollups[1].average_overall, 3.0);
        assert_eq!(
            rollups[1].functions,
            vec![Function::Planning, Function::DigitalMerch]
        );
        assert_eq!(
            rollups[1].last_submitted,
            Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rollup_rank_ties_are_stable() {
        let rows = vec![
            eval_at("Jane Doe", Function::Planning, 1, 4.0, 1),
            eval_at("Amy Lee", Function::Planning, 1, 4.0, 2),
        ];
        let rollups = participant_rollup(&rows);
        assert_eq!(rollups[0].mdp_name, "Jane Doe");
        assert_eq!(rollups[1].mdp_name, "Amy Lee");
    }

    #[test]
    fn test_participant_series_sorted_by_rotation() {
        let rows = vec![
            eval_at("Jane Doe", Function::DigitalMerch, 2, 5.0, 5),
            eval_at("Jane Doe", Function::Planning, 1, 4.0, 1),
            eval_at("Amy Lee", Function::Planning, 1, 3.0, 2),
        ];
        let series = participant_series(&rows, "Jane Doe");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].rotation, 1);
        assert_eq!(series[1].rotation, 2);
        assert_eq!(series[1].by_area[&Area::JobKnowledge], 5.0);
    }
}
