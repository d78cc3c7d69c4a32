//! Rotation sequencing and per-participant exclusivity checks
//!
//! Rotation numbers are assigned server-side as a contiguous sequence
//! 1..N per participant. Both checks run before anything is persisted, so
//! a rejection leaves the store untouched.

use crate::error::{Error, Result};
use crate::model::{Evaluation, Function};

/// Next rotation number for a participant: prior evaluation count + 1
pub fn next_rotation(history: &[Evaluation]) -> u32 {
    history.len() as u32 + 1
}

/// Check a candidate submission against the participant's prior history and
/// return the rotation number the new evaluation will carry.
///
/// `history` must hold every prior evaluation for `mdp_name`, in submission
/// order.
pub fn sequence_submission(
    mdp_name: &str,
    function: Function,
    history: &[Evaluation],
) -> Result<u32> {
    let rotation = next_rotation(history);

    // Unreachable with sequential assignment, but kept as a hard check so a
    // corrupted store cannot silently double-book a rotation.
    if history.iter().any(|e| e.rotation == rotation) {
        return Err(Error::DuplicateRotation(format!(
            "Rotation {} already exists for {}. Only one survey per rotation allowed.",
            rotation, mdp_name
        )));
    }

    if history.iter().any(|e| e.function_name == function) {
        return Err(Error::DuplicateFunction(format!(
            "{} has already completed the {} function. Please select a different function.",
            mdp_name, function
        )));
    }

    Ok(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Responses;
    use chrono::Utc;

    fn eval(mdp: &str, function: Function, rotation: u32) -> Evaluation {
        Evaluation {
            id: format!("{}-{}", mdp, rotation),
            mdp_name: mdp.into(),
            function_name: function,
            manager: "Test Manager".into(),
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
    fn test_first_submission_gets_rotation_one() {
        let rotation = sequence_submission("Jane Doe", Function::Planning, &[]).unwrap();
        assert_eq!(rotation, 1);
    }

    #[test]
    fn test_rotations_are_contiguous() {
        let mut history = Vec::new();
        let functions = [
            Function::Planning,
            Function::DigitalMerch,
            Function::Replenishment,
            Function::MembersMark,
        ];

        for (i, function) in functions.into_iter().enumerate() {
            let rotation = sequence_submission("Jane Doe", function, &history).unwrap();
            assert_eq!(rotation, i as u32 + 1);
            history.push(eval("Jane Doe", function, rotation));
        }
    }

    #[test]
    fn test_repeated_function_rejected() {
        let history = vec![
            eval("Jane Doe", Function::Planning, 1),
            eval("Jane Doe", Function::DigitalMerch, 2),
        ];

        let err =
            sequence_submission("Jane Doe", Function::Planning, &history).unwrap_err();
        assert!(matches!(err, Error::DuplicateFunction(_)), "{}", err);
        assert!(err.to_string().contains("Planning"));
    }

    #[test]
    fn test_corrupted_history_rotation_collision_rejected() {
        // A gap plus a high rotation makes priorCount + 1 collide
        let history = vec![
            eval("Jane Doe", Function::Planning, 2),
            eval("Jane Doe", Function::DigitalMerch, 3),
        ];
        // next would be 3, which already exists

        let err =
            sequence_submission("Jane Doe", Function::Replenishment, &history).unwrap_err();
        assert!(matches!(err, Error::DuplicateRotation(_)), "{}", err);
    }
}
