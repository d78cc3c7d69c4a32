//! Score computation for submitted response sets
//!
//! Area scores are unweighted means of the 1-5 ratings for that area's
//! questions. The overall score is the area-weighted composite over areas
//! that are actually present: a zero area score can only arise from missing
//! data (ratings are bounded below by 1), so zero-valued areas are excluded
//! and the remaining weights renormalize.

use crate::error::{Error, Result};
use crate::model::{Area, AreaScores, Question, Responses};

/// Round to two decimal places, the precision all stored scores carry
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computed scores for one response set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedScores {
    pub areas: AreaScores,
    pub overall: f64,
}

/// Validate a response set against its question list.
///
/// Exactly the defined question ids must be present, each with a rating in
/// [1,5].
pub fn validate_responses(responses: &Responses, questions: &[Question]) -> Result<()> {
    for question in questions {
        match responses.get(question.id) {
            None => {
                return Err(Error::Validation(format!(
                    "missing rating for question {}",
                    question.id
                )))
            }
            Some(rating) if !(1..=5).contains(rating) => {
                return Err(Error::Validation(format!(
                    "rating for question {} out of range: {}",
                    question.id, rating
                )))
            }
            Some(_) => {}
        }
    }

    if responses.len() != questions.len() {
        let unknown = responses
            .keys()
            .find(|id| !questions.iter().any(|q| q.id == id.as_str()))
            .map(String::as_str)
            .unwrap_or("?");
        return Err(Error::Validation(format!(
            "unexpected question id: {}",
            unknown
        )));
    }

    Ok(())
}

/// Mean of the ratings for all questions tagged with `area`, rounded to two
/// decimals. Zero when the set defines no questions for the area.
pub fn area_score(responses: &Responses, questions: &[Question], area: Area) -> f64 {
    let ratings: Vec<i64> = questions
        .iter()
        .filter(|q| q.area == area)
        .filter_map(|q| responses.get(q.id))
        .copied()
        .collect();

    if ratings.is_empty() {
        return 0.0;
    }

    round2(ratings.iter().sum::<i64>() as f64 / ratings.len() as f64)
}

/// Weighted overall score across areas with a non-zero score, rounded to two
/// decimals. Zero when every area is absent (guarded division).
pub fn overall_score(areas: &AreaScores) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for area in Area::ALL {
        let score = areas.get(area);
        if score > 0.0 {
            weighted += score * area.weight();
            total_weight += area.weight();
        }
    }

    if total_weight > 0.0 {
        round2(weighted / total_weight)
    } else {
        0.0
    }
}

/// Validate and score one response set against its function's question list
pub fn score_responses(responses: &Responses, questions: &[Question]) -> Result<ComputedScores> {
    validate_responses(responses, questions)?;

    let areas = AreaScores {
        job_knowledge: area_score(responses, questions, Area::JobKnowledge),
        quality_of_work: area_score(responses, questions, Area::QualityOfWork),
        communication: area_score(responses, questions, Area::Communication),
        initiative: area_score(responses, questions, Area::Initiative),
    };
    let overall = overall_score(&areas);

    Ok(ComputedScores { areas, overall })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Function;
    use crate::questions::question_set;

    fn constant_responses(rating: i64) -> Responses {
        question_set(Function::Planning)
            .iter()
            .map(|q| (q.id.to_string(), rating))
            .collect()
    }

    #[test]
    fn test_constant_ratings_score_exactly() {
        for rating in 1..=5 {
            let responses = constant_responses(rating);
            let scores =
                score_responses(&responses, question_set(Function::Planning)).unwrap();
            let expected = rating as f64;

            for area in Area::ALL {
                assert_eq!(scores.areas.get(area), expected, "{}", area);
            }
            assert_eq!(scores.overall, expected);
        }
    }

    #[test]
    fn test_area_score_is_unweighted_mean() {
        let mut responses = constant_responses(3);
        // Job Knowledge ratings 5, 4, 3, 2 -> mean 3.5
        responses.insert("Q1".into(), 5);
        responses.insert("Q2".into(), 4);
        responses.insert("Q3".into(), 3);
        responses.insert("Q4".into(), 2);

        let questions = question_set(Function::Planning);
        assert_eq!(area_score(&responses, questions, Area::JobKnowledge), 3.5);
    }

    #[test]
    fn test_area_score_rounds_to_two_decimals() {
        let mut responses = constant_responses(3);
        // Initiative ratings 4, 5 -> 4.5; Communication 2, 5 -> 3.5
        responses.insert("Q9".into(), 4);
        responses.insert("Q10".into(), 5);
        responses.insert("Q7".into(), 2);
        responses.insert("Q8".into(), 5);

        let questions = question_set(Function::Planning);
        assert_eq!(area_score(&responses, questions, Area::Initiative), 4.5);
        assert_eq!(area_score(&responses, questions, Area::Communication), 3.5);
    }

    #[test]
    fn test_overall_weights_areas() {
        // JK 4.0 (0.50), QW 3.0 (0.20), Comm 2.0 (0.15), Init 5.0 (0.15)
        let areas = AreaScores {
            job_knowledge: 4.0,
            quality_of_work: 3.0,
            communication: 2.0,
            initiative: 5.0,
        };
        // 4*0.5 + 3*0.2 + 2*0.15 + 5*0.15 = 3.65
        assert_eq!(overall_score(&areas), 3.65);
    }

    #[test]
    fn test_overall_renormalizes_when_area_missing() {
        // Job Knowledge absent: remaining weights 0.20:0.15:0.15 renormalize
        let areas = AreaScores {
            job_knowledge: 0.0,
            quality_of_work: 4.0,
            communication: 3.0,
            initiative: 5.0,
        };
        // (4*0.2 + 3*0.15 + 5*0.15) / 0.5 = 2.0 / 0.5 = 4.0
        assert_eq!(overall_score(&areas), 4.0);
    }

    #[test]
    fn test_overall_zero_when_all_areas_missing() {
        assert_eq!(overall_score(&AreaScores::ZERO), 0.0);
    }

    #[test]
    fn test_missing_question_rejected() {
        let mut responses = constant_responses(4);
        responses.remove("Q7");

        let err = score_responses(&responses, question_set(Function::Planning)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{}", err);
    }

    #[test]
    fn test_unknown_question_rejected() {
        let mut responses = constant_responses(4);
        responses.insert("Q11".into(), 3);

        let err = score_responses(&responses, question_set(Function::Planning)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{}", err);
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        for bad in [0, 6, -1] {
            let mut responses = constant_responses(4);
            responses.insert("Q3".into(), bad);

            let err =
                score_responses(&responses, question_set(Function::Planning)).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "rating {}", bad);
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.333333), 3.33);
        assert_eq!(round2(3.336), 3.34);
        assert_eq!(round2(5.0), 5.0);
    }
}
