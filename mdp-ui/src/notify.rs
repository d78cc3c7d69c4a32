//! Detached email notification
//!
//! Dispatched after successful persistence as a fire-and-forget task; the
//! submission's outcome never depends on it. Failures are logged and never
//! retried.

use mdp_common::model::Evaluation;
use tracing::{info, warn};

/// Sends evaluation summaries to respondents through an HTTP mail relay.
///
/// An unconfigured relay endpoint disables delivery entirely.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl Notifier {
    pub fn new(endpoint: Option<String>) -> Self {
        Notifier {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Notifier that drops every dispatch
    pub fn disabled() -> Self {
        Notifier::new(None)
    }

    /// Queue a summary email for a just-stored evaluation and return
    /// immediately. Skipped unless the respondent asked for a copy and left
    /// an address.
    pub fn dispatch(&self, evaluation: &Evaluation) {
        if !evaluation.email_response {
            return;
        }
        let Some(to) = evaluation.respondent_email.clone() else {
            return;
        };
        let Some(endpoint) = self.endpoint.clone() else {
            info!(
                "Mail relay not configured, skipping summary for evaluation {}",
                evaluation.id
            );
            return;
        };

        let client = self.client.clone();
        let evaluation_id = evaluation.id.clone();
        let subject = format!("MDP Performance Evaluation - {}", evaluation.mdp_name);
        let text = summary_text(evaluation);

        tokio::spawn(async move {
            let payload = serde_json::json!({
                "to": to,
                "subject": subject,
                "text": text,
            });

            match client.post(&endpoint).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("Sent evaluation summary for {}", evaluation_id);
                }
                Ok(response) => {
                    warn!(
                        "Mail relay rejected summary for {}: {}",
                        evaluation_id,
                        response.status()
                    );
                }
                Err(err) => {
                    warn!("Failed to send summary for {}: {}", evaluation_id, err);
                }
            }
        });
    }
}

/// Plain-text summary mailed to the respondent
fn summary_text(evaluation: &Evaluation) -> String {
    format!(
        "MDP Performance Evaluation Summary\n\
         \n\
         MDP: {}\n\
         Function: {}\n\
         Manager: {}\n\
         Rotation: {}\n\
         Submitted: {}\n\
         \n\
         PERFORMANCE SCORES:\n\
         - Job Knowledge: {}/5\n\
         - Quality of Work: {}/5\n\
         - Communication & Teamwork: {}/5\n\
         - Initiative & Productivity: {}/5\n\
         - Overall Score: {}/5\n\
         \n\
         Thank you for completing the MDP Performance Evaluation!",
        evaluation.mdp_name,
        evaluation.function_name,
        evaluation.manager,
        evaluation.rotation,
        evaluation.submitted_at.to_rfc3339(),
        evaluation.job_knowledge,
        evaluation.quality_of_work,
        evaluation.communication,
        evaluation.initiative,
        evaluation.overall,
    )
}
