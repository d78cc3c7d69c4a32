//! Survey question catalog
//!
//! Four fixed question sets, one per rotation function. Q1-Q4 probe
//! function-specific job knowledge; Q5-Q10 are identical across functions
//! and cover the remaining three assessment areas. Within one set, all
//! questions sharing an area carry the same weight, so area scores are
//! plain means.

use crate::model::{Area, Function, Question};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const fn q(id: &'static str, text: &'static str, area: Area, weight: f64) -> Question {
    Question {
        id,
        text,
        area,
        weight,
    }
}

/// Q5-Q10 are shared by every function's question set
const SHARED_TAIL: [Question; 6] = [
    q(
        "Q5",
        "MDP produced high-quality deliverables that reflected strong attention to detail and accuracy.",
        Area::QualityOfWork,
        0.2,
    ),
    q(
        "Q6",
        "MDP demonstrated problem-solving skills in their work, contributing meaningful insights or improvements to the team or their project.",
        Area::QualityOfWork,
        0.2,
    ),
    q(
        "Q7",
        "MDP communicated clearly and effectively with team, stakeholders, and cross-functional partners throughout the rotation.",
        Area::Communication,
        0.15,
    ),
    q(
        "Q8",
        "MDP demonstrated strong collaboration skills and contributed positively to team dynamics.",
        Area::Communication,
        0.15,
    ),
    q(
        "Q9",
        "MDP consistently demonstrated initiative by proactively identifying opportunities, asking thoughtful questions, and seeking out ways to add value during the rotation.",
        Area::Initiative,
        0.15,
    ),
    q(
        "Q10",
        "MDP maintained a high level of productivity while also effectively managing their time and responsibilities.",
        Area::Initiative,
        0.15,
    ),
];

fn build_set(job_knowledge: [Question; 4]) -> Vec<Question> {
    job_knowledge.into_iter().chain(SHARED_TAIL).collect()
}

static CATALOG: Lazy<HashMap<Function, Vec<Question>>> = Lazy::new(|| {
    let mut catalog = HashMap::new();

    catalog.insert(
        Function::Planning,
        build_set([
            q(
                "Q1",
                "MDP can effectively explain their category's P&L and tell a compelling business story through it.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q2",
                "To what extent does the participant demonstrate fluency in retail math and independently access key financial metrics?",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q3",
                "MDP can navigate and apply financial planning tools (e.g., PBC, ISB Forecasting, AOP, One-Time-Buy).",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q4",
                "MDP can understand and articulate the financial impact of decisions on their category, including budget and JBP alignment.",
                Area::JobKnowledge,
                0.5,
            ),
        ]),
    );

    catalog.insert(
        Function::DigitalMerch,
        build_set([
            q(
                "Q1",
                "MDP demonstrated a clear understanding of the HAVE + FIND + LOVE + BUY framework and how it supports the digital purchase funnel at Sam's Club.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q2",
                "MDP can articulate how Digital Merchandising's strategy aligns with the broader Sam's Club strategy, particularly in accelerating the omni member experience.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q3",
                "MDP understands and can articulate how images and content impact SEO in Google.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q4",
                "MDP has a solid understanding of how items come to life on samsclub.com, from creation to discovery, checkout, and delivery.",
                Area::JobKnowledge,
                0.5,
            ),
        ]),
    );

    catalog.insert(
        Function::Replenishment,
        build_set([
            q(
                "Q1",
                "MDP demonstrates confidence in using dashboards and reporting tools across replenishment systems to identify demand accuracy and support decision-making.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q2",
                "MDP understands the importance of item creation and maintenance accuracy, and recognizes how errors in this process can impact club operations.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q3",
                "MDP applies strategies to improve forecast accuracy and shows an understanding of how demand planning decisions drive seasonal and short-term sell-through.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q4",
                "MDP demonstrates an understanding of the importance of collaboration between merchants and replenishment teams in strengthening inventory allocation and supporting club performance.",
                Area::JobKnowledge,
                0.5,
            ),
        ]),
    );

    catalog.insert(
        Function::MembersMark,
        build_set([
            q(
                "Q1",
                "MDP demonstrates a clear understanding of the Member's Mark ambition and strategy, and can articulate how it connects to the broader Sam's Club strategy.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q2",
                "MDP demonstrated a strong understanding of the Member's Mark creative guidelines and contributed to delivering a consistent member experience through packaging and design.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q3",
                "MDP effectively engaged with member research and sensory testing processes, showing a clear understanding of how member insights inform product development.",
                Area::JobKnowledge,
                0.5,
            ),
            q(
                "Q4",
                "MDP showed a solid grasp of cross-functional collaboration, including quality, sourcing, and brand line management, and how these functions align to support the Member's Mark strategy.",
                Area::JobKnowledge,
                0.5,
            ),
        ]),
    );

    catalog
});

/// Ordered question set for a function (always exactly 10 questions)
pub fn question_set(function: Function) -> &'static [Question] {
    &CATALOG[&function]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_function_has_ten_questions() {
        for func in Function::ALL {
            assert_eq!(question_set(func).len(), 10, "{}", func);
        }
    }

    #[test]
    fn test_question_ids_are_sequential() {
        for func in Function::ALL {
            let ids: Vec<&str> = question_set(func).iter().map(|q| q.id).collect();
            assert_eq!(
                ids,
                vec!["Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7", "Q8", "Q9", "Q10"]
            );
        }
    }

    #[test]
    fn test_all_areas_represented_in_each_set() {
        for func in Function::ALL {
            for area in Area::ALL {
                assert!(
                    question_set(func).iter().any(|q| q.area == area),
                    "{} missing {}",
                    func,
                    area
                );
            }
        }
    }

    #[test]
    fn test_weights_are_uniform_within_area() {
        for func in Function::ALL {
            for area in Area::ALL {
                let weights: Vec<f64> = question_set(func)
                    .iter()
                    .filter(|q| q.area == area)
                    .map(|q| q.weight)
                    .collect();
                assert!(weights.windows(2).all(|w| w[0] == w[1]));
                assert_eq!(weights[0], area.weight());
            }
        }
    }
}
