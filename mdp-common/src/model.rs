//! Domain model: assessment areas, functions, questions, evaluations

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the four assessment dimensions every question set covers.
///
/// Variant order is the canonical area ordering; extrema tie-breaking and
/// dashboard layouts depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Job Knowledge")]
    JobKnowledge,
    #[serde(rename = "Quality of Work")]
    QualityOfWork,
    #[serde(rename = "Communication Skills & Teamwork")]
    Communication,
    #[serde(rename = "Initiative & Productivity")]
    Initiative,
}

impl Area {
    /// Canonical area ordering
    pub const ALL: [Area; 4] = [
        Area::JobKnowledge,
        Area::QualityOfWork,
        Area::Communication,
        Area::Initiative,
    ];

    /// Display label as used on survey forms and exports
    pub fn label(&self) -> &'static str {
        match self {
            Area::JobKnowledge => "Job Knowledge",
            Area::QualityOfWork => "Quality of Work",
            Area::Communication => "Communication Skills & Teamwork",
            Area::Initiative => "Initiative & Productivity",
        }
    }

    /// Weight of this area in the overall composite score
    pub fn weight(&self) -> f64 {
        match self {
            Area::JobKnowledge => 0.50,
            Area::QualityOfWork => 0.20,
            Area::Communication => 0.15,
            Area::Initiative => 0.15,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Business function a participant is evaluated in for one rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Function {
    #[serde(rename = "Planning")]
    Planning,
    #[serde(rename = "Digital Merch")]
    DigitalMerch,
    #[serde(rename = "Replenishment")]
    Replenishment,
    #[serde(rename = "Member's Mark")]
    MembersMark,
}

impl Function {
    /// All four rotation functions
    pub const ALL: [Function; 4] = [
        Function::Planning,
        Function::DigitalMerch,
        Function::Replenishment,
        Function::MembersMark,
    ];

    /// Display name as stored and shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Planning => "Planning",
            Function::DigitalMerch => "Digital Merch",
            Function::Replenishment => "Replenishment",
            Function::MembersMark => "Member's Mark",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|func| func.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("unknown function: {}", s)))
    }
}

/// One survey question, tagged with its assessment area and weight
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub area: Area,
    pub weight: f64,
}

/// Raw ratings keyed by question id, each in [1,5]
pub type Responses = BTreeMap<String, i64>;

/// Per-area scores for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaScores {
    pub job_knowledge: f64,
    pub quality_of_work: f64,
    pub communication: f64,
    pub initiative: f64,
}

impl AreaScores {
    pub const ZERO: AreaScores = AreaScores {
        job_knowledge: 0.0,
        quality_of_work: 0.0,
        communication: 0.0,
        initiative: 0.0,
    };

    pub fn get(&self, area: Area) -> f64 {
        match area {
            Area::JobKnowledge => self.job_knowledge,
            Area::QualityOfWork => self.quality_of_work,
            Area::Communication => self.communication,
            Area::Initiative => self.initiative,
        }
    }
}

/// One persisted survey evaluation.
///
/// Immutable once created; `rotation`, `id`, and `submitted_at` are assigned
/// server-side, and the score fields are derived from `responses` at
/// submission time, never edited independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub mdp_name: String,
    pub function_name: Function,
    pub manager: String,
    pub rotation: u32,
    pub responses: Responses,
    pub job_knowledge: f64,
    pub quality_of_work: f64,
    pub communication: f64,
    pub initiative: f64,
    pub overall: f64,
    pub submitted_at: DateTime<Utc>,
    pub email_response: bool,
    pub respondent_email: Option<String>,
}

impl Evaluation {
    /// Score for one assessment area
    pub fn area_score(&self, area: Area) -> f64 {
        self.area_scores().get(area)
    }

    /// The four area scores as a unit
    pub fn area_scores(&self) -> AreaScores {
        AreaScores {
            job_knowledge: self.job_knowledge,
            quality_of_work: self.quality_of_work,
            communication: self.communication,
            initiative: self.initiative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_weights_sum_to_one() {
        let total: f64 = Area::ALL.iter().map(|a| a.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_function_round_trip() {
        for func in Function::ALL {
            assert_eq!(func.as_str().parse::<Function>().unwrap(), func);
        }
        assert!("Logistics".parse::<Function>().is_err());
    }

    #[test]
    fn test_function_serde_uses_display_names() {
        let json = serde_json::to_string(&Function::MembersMark).unwrap();
        assert_eq!(json, "\"Member's Mark\"");
        let parsed: Function = serde_json::from_str("\"Digital Merch\"").unwrap();
        assert_eq!(parsed, Function::DigitalMerch);
    }

    #[test]
    fn test_evaluation_wire_format_is_camel_case() {
        let eval = Evaluation {
            id: "1".into(),
            mdp_name: "Jane Doe".into(),
            function_name: Function::Planning,
            manager: "John Smith".into(),
            rotation: 1,
            responses: Responses::new(),
            job_knowledge: 4.0,
            quality_of_work: 4.0,
            communication: 4.0,
            initiative: 4.0,
            overall: 4.0,
            submitted_at: Utc::now(),
            email_response: false,
            respondent_email: None,
        };
        let value = serde_json::to_value(&eval).unwrap();
        assert!(value.get("mdpName").is_some());
        assert!(value.get("jobKnowledge").is_some());
        assert!(value.get("submittedAt").is_some());
        assert_eq!(value["functionName"], "Planning");
    }
}
