//! Dashboard view-model endpoints
//!
//! The presentation layer's input contract. Each handler is the same pure
//! derivation pipeline: filters + raw data -> filtered data -> aggregates
//! -> view model. Participant names pass through the privacy formatter
//! wherever they are display strings; raw names appear only as stable
//! identifiers for follow-up requests.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use mdp_common::aggregate::{
    area_extrema, cohort_averages, participant_rollup, participant_series, AreaExtrema,
    CohortAverages, ParticipantRollup, RotationPoint,
};
use mdp_common::compare::{compare, BestRotation, Comparison};
use mdp_common::filter::CohortFilter;
use mdp_common::model::{Area, Evaluation, Function};
use mdp_common::names::format_name;

use super::handlers::ApiError;
use crate::AppState;

/// GET /api/dashboard/cohort
///
/// Cohort-level tiles and table for the filtered evaluation set.
pub async fn cohort_view(
    State(state): State<AppState>,
    Query(filter): Query<CohortFilter>,
) -> Result<Json<CohortView>, ApiError> {
    let rows = filter.apply(&state.store.all().await?);

    let averages = cohort_averages(&rows);
    let extrema = area_extrema(&averages.by_area);
    let top = mdp_common::aggregate::top_performer(&rows);

    let mut mdp_names: Vec<&str> = Vec::new();
    for eval in &rows {
        if !mdp_names.contains(&eval.mdp_name.as_str()) {
            mdp_names.push(&eval.mdp_name);
        }
    }

    let participants = participant_rollup(&rows)
        .into_iter()
        .map(ParticipantRow::from)
        .collect();

    Ok(Json(CohortView {
        response_count: rows.len(),
        mdp_count: mdp_names.len(),
        averages,
        top_performer: TopPerformerView {
            display_names: top.names.iter().map(|n| format_name(n)).collect(),
            names: top.names,
            score: top.score,
            is_tied: top.is_tied,
        },
        extrema,
        participants,
    }))
}

/// GET /api/dashboard/individual/:mdp
///
/// One participant's trend series and latest breakdown against the cohort
/// baseline.
pub async fn individual_view(
    State(state): State<AppState>,
    Path(mdp): Path<String>,
    Query(filter): Query<CohortFilter>,
) -> Result<Json<IndividualView>, ApiError> {
    let rows = filter.apply(&state.store.all().await?);

    let series = participant_series(&rows, &mdp);
    let own_rows: Vec<&Evaluation> = rows.iter().filter(|e| e.mdp_name == mdp).collect();
    let latest = own_rows.last();

    let latest_by_area: BTreeMap<Area, f64> = latest
        .map(|eval| {
            Area::ALL
                .into_iter()
                .map(|area| (area, eval.area_score(area)))
                .collect()
        })
        .unwrap_or_default();

    // Earliest rotation wins an exact tie
    let mut best: Option<&Evaluation> = None;
    for eval in own_rows.iter().copied() {
        if best.map_or(true, |b| eval.overall > b.overall) {
            best = Some(eval);
        }
    }
    let best_rotation = best.map(|e| BestRotation {
        rotation: e.rotation,
        score: e.overall,
    });

    Ok(Json(IndividualView {
        display_name: format_name(&mdp),
        mdp_name: mdp,
        latest_overall: latest.map(|e| e.overall).unwrap_or(0.0),
        best_rotation,
        extrema: area_extrema(&latest_by_area),
        latest_by_area,
        cohort_by_area: cohort_averages(&rows).by_area,
        series,
    }))
}

/// GET /api/dashboard/compare?a=&b=
///
/// Head-to-head view model for two participants over the filtered set.
pub async fn compare_view(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareView>, ApiError> {
    let rows = query.filter().apply(&state.store.all().await?);
    let comparison = compare(&rows, &query.a, &query.b);

    Ok(Json(CompareView {
        a: SideLabel {
            display_name: format_name(&query.a),
            name: query.a,
        },
        b: SideLabel {
            display_name: format_name(&query.b),
            name: query.b,
        },
        comparison,
    }))
}

/// Cohort dashboard payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortView {
    pub response_count: usize,
    pub mdp_count: usize,
    pub averages: CohortAverages,
    pub top_performer: TopPerformerView,
    pub extrema: Option<AreaExtrema>,
    pub participants: Vec<ParticipantRow>,
}

/// Top performer tile with privacy-formatted names
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformerView {
    pub names: Vec<String>,
    pub display_names: Vec<String>,
    pub score: f64,
    pub is_tied: bool,
}

/// One cohort-table row, rollup plus its display name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub display_name: String,
    #[serde(flatten)]
    pub rollup: ParticipantRollup,
}

impl From<ParticipantRollup> for ParticipantRow {
    fn from(rollup: ParticipantRollup) -> Self {
        ParticipantRow {
            display_name: format_name(&rollup.mdp_name),
            rollup,
        }
    }
}

/// Individual dashboard payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualView {
    pub mdp_name: String,
    pub display_name: String,
    pub latest_overall: f64,
    pub best_rotation: Option<BestRotation>,
    pub extrema: Option<AreaExtrema>,
    pub latest_by_area: BTreeMap<Area, f64>,
    pub cohort_by_area: BTreeMap<Area, f64>,
    pub series: Vec<RotationPoint>,
}

/// Comparison query: two participants plus the cohort filter fields
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub a: String,
    pub b: String,
    pub function: Option<Function>,
    pub manager: Option<String>,
    pub rotation: Option<u32>,
    pub search: Option<String>,
}

impl CompareQuery {
    fn filter(&self) -> CohortFilter {
        CohortFilter {
            function: self.function,
            manager: self.manager.clone(),
            rotation: self.rotation,
            search: self.search.clone(),
        }
    }
}

/// Comparison payload: side labels plus the engine's view model
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareView {
    pub a: SideLabel,
    pub b: SideLabel,
    #[serde(flatten)]
    pub comparison: Comparison,
}

/// Raw identifier plus privacy-formatted display string for one side
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideLabel {
    pub name: String,
    pub display_name: String,
}
