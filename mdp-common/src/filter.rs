//! Predicate filtering over evaluation sequences
//!
//! Filtering is plain predicate composition applied before aggregation or
//! comparison; the aggregation contracts themselves take the already
//! filtered slice.

use crate::model::{Evaluation, Function};
use crate::names::normalize_manager;
use serde::Deserialize;

/// Dashboard filter set. Unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CohortFilter {
    /// Restrict to one rotation function
    pub function: Option<Function>,
    /// Restrict to one manager (compared in normalized form)
    pub manager: Option<String>,
    /// Restrict to one rotation number
    pub rotation: Option<u32>,
    /// Case-insensitive substring match on the participant name
    pub search: Option<String>,
}

impl CohortFilter {
    pub fn matches(&self, eval: &Evaluation) -> bool {
        if let Some(function) = self.function {
            if eval.function_name != function {
                return false;
            }
        }

        if let Some(manager) = &self.manager {
            if normalize_manager(&eval.manager) != normalize_manager(manager) {
                return false;
            }
        }

        if let Some(rotation) = self.rotation {
            if eval.rotation != rotation {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !eval.mdp_name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }

    /// Filtered copy of `evals`, preserving order
    pub fn apply(&self, evals: &[Evaluation]) -> Vec<Evaluation> {
        evals
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Responses;
    use chrono::Utc;

    fn eval(mdp: &str, function: Function, manager: &str, rotation: u32) -> Evaluation {
        Evaluation {
            id: format!("{}-{}", mdp, rotation),
            mdp_name: mdp.into(),
            function_name: function,
            manager: manager.into(),
            rotation,
            responses: Responses::new(),
            job_knowledge: 4.0,
            quality_of_work: 4.0,
            communication: 4.0,
            initiative: 4.0,
            overall: 4.0,
            submitted_at: Utc::now(),
            email_response: false,
            respondent_email: None,
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let rows = vec![
            eval("Jane Doe", Function::Planning, "John Smith", 1),
            eval("Amy Lee", Function::Replenishment, "Sara Park", 2),
        ];
        assert_eq!(CohortFilter::default().apply(&rows).len(), 2);
    }

    #[test]
    fn test_function_filter() {
        let rows = vec![
            eval("Jane Doe", Function::Planning, "John Smith", 1),
            eval("Amy Lee", Function::Replenishment, "Sara Park", 1),
        ];
        let filter = CohortFilter {
            function: Some(Function::Planning),
            ..Default::default()
        };
        let filtered = filter.apply(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].mdp_name, "Jane Doe");
    }

    #[test]
    fn test_manager_filter_normalizes_both_sides() {
        let rows = vec![eval("Jane Doe", Function::Planning, "  john SMITH ", 1)];
        let filter = CohortFilter {
            manager: Some("John Smith".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rows).len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = vec![
            eval("Jane Doe", Function::Planning, "John Smith", 1),
            eval("Amy Lee", Function::Replenishment, "Sara Park", 1),
        ];
        let filter = CohortFilter {
            search: Some("jane".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&rows).len(), 1);

        let blank = CohortFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(blank.apply(&rows).len(), 2);
    }

    #[test]
    fn test_rotation_filter() {
        let rows = vec![
            eval("Jane Doe", Function::Planning, "John Smith", 1),
            eval("Jane Doe", Function::Replenishment, "John Smith", 2),
        ];
        let filter = CohortFilter {
            rotation: Some(2),
            ..Default::default()
        };
        let filtered = filter.apply(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rotation, 2);
    }
}
