//! CSV export of evaluations
//!
//! Fixed column order, every value double-quoted. Participant names pass
//! through the privacy formatter; the stored name never leaves the store
//! unformatted here.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use mdp_common::filter::CohortFilter;
use mdp_common::model::Evaluation;
use mdp_common::names::format_name;
use mdp_common::questions::question_set;

use super::handlers::ApiError;
use crate::AppState;

/// Export column order
pub const CSV_HEADERS: [&str; 20] = [
    "Name",
    "Function",
    "Manager",
    "Rotation",
    "Overall",
    "JobKnowledge",
    "QualityOfWork",
    "Communication",
    "Initiative",
    "SubmittedDate",
    "Q1",
    "Q2",
    "Q3",
    "Q4",
    "Q5",
    "Q6",
    "Q7",
    "Q8",
    "Q9",
    "Q10",
];

/// GET /api/export/evaluations.csv
///
/// CSV of the filtered evaluation set, served as an attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<CohortFilter>,
) -> Result<Response, ApiError> {
    let rows = filter.apply(&state.store.all().await?);
    let csv = evaluations_to_csv(&rows);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"evaluations.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Render evaluations as CSV with the fixed header row
pub fn evaluations_to_csv(rows: &[Evaluation]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(quote_row(CSV_HEADERS.iter().map(|h| h.to_string())));

    for eval in rows {
        let mut fields = vec![
            format_name(&eval.mdp_name),
            eval.function_name.to_string(),
            eval.manager.clone(),
            eval.rotation.to_string(),
            format!("{:.2}", eval.overall),
            format!("{:.2}", eval.job_knowledge),
            format!("{:.2}", eval.quality_of_work),
            format!("{:.2}", eval.communication),
            format!("{:.2}", eval.initiative),
            eval.submitted_at.to_rfc3339(),
        ];

        // Ratings in question order, not response-map order
        for question in question_set(eval.function_name) {
            fields.push(
                eval.responses
                    .get(question.id)
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
            );
        }

        lines.push(quote_row(fields.into_iter()));
    }

    lines.join("\n")
}

fn quote_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mdp_common::model::{Function, Responses};

    fn eval() -> Evaluation {
        let responses: Responses = question_set(Function::Planning)
            .iter()
            .map(|q| (q.id.to_string(), 4))
            .collect();
        Evaluation {
            id: "1".into(),
            mdp_name: "Jane Smith".into(),
            function_name: Function::Planning,
            manager: "John Smith".into(),
            rotation: 1,
            responses,
            job_knowledge: 4.0,
            quality_of_work: 4.0,
            communication: 4.0,
            initiative: 4.0,
            overall: 4.0,
            submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            email_response: false,
            respondent_email: None,
        }
    }

    #[test]
    fn test_header_row_order() {
        let csv = evaluations_to_csv(&[]);
        assert!(csv.starts_with("\"Name\",\"Function\",\"Manager\",\"Rotation\",\"Overall\""));
        assert!(csv.ends_with("\"Q9\",\"Q10\""));
    }

    #[test]
    fn test_values_are_quoted_and_name_formatted() {
        let csv = evaluations_to_csv(&[eval()]);
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.starts_with("\"Jane S.\",\"Planning\",\"John Smith\",\"1\",\"4.00\""));
        assert_eq!(data_line.matches('"').count(), 40);
    }

    #[test]
    fn test_ratings_follow_question_order() {
        let mut record = eval();
        record.responses.insert("Q2".into(), 5);
        let csv = evaluations_to_csv(&[record]);
        let data_line = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = data_line.split(',').collect();
        // Q1..Q10 occupy the last ten columns
        assert_eq!(fields[10], "\"4\"");
        assert_eq!(fields[11], "\"5\"");
        assert_eq!(fields.len(), 20);
    }
}
