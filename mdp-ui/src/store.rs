//! Evaluation store: the durable append-only collection
//!
//! The store exclusively owns the persisted records; callers always receive
//! owned snapshots, never live references into storage. Records are
//! immutable once created; the only mutation is a hard remove by id.

use chrono::{DateTime, Utc};
use mdp_common::error::{Error, Result};
use mdp_common::model::{Evaluation, Function, Responses};
use mdp_common::scoring::ComputedScores;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Fields of a not-yet-persisted evaluation; id and submission timestamp are
/// assigned by `append`
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub mdp_name: String,
    pub function_name: Function,
    /// Stored in normalized form
    pub manager: String,
    pub rotation: u32,
    pub responses: Responses,
    pub scores: ComputedScores,
    pub email_response: bool,
    pub respondent_email: Option<String>,
}

/// Append-only evaluation store backed by SQLite.
///
/// The write lock serializes the whole read-validate-write submission
/// sequence, so two concurrent submissions for the same participant cannot
/// both compute the same rotation number. Reads never take the lock.
#[derive(Clone)]
pub struct EvaluationStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

const SELECT_COLUMNS: &str = "id, mdp_name, function_name, manager, rotation, responses, \
     job_knowledge, quality_of_work, communication, initiative, overall, \
     submitted_at, email_response, respondent_email";

impl EvaluationStore {
    pub fn new(pool: SqlitePool) -> Self {
        EvaluationStore {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Hold this guard across a submission's read-validate-write sequence
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// All evaluations in insertion order
    pub async fn all(&self) -> Result<Vec<Evaluation>> {
        let sql = format!("SELECT {} FROM evaluations ORDER BY seq", SELECT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_evaluation).collect()
    }

    /// One participant's evaluations, in submission order
    pub async fn history(&self, mdp_name: &str) -> Result<Vec<Evaluation>> {
        let sql = format!(
            "SELECT {} FROM evaluations WHERE mdp_name = ? ORDER BY seq",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(mdp_name)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_evaluation).collect()
    }

    /// Append a new record, assigning its id and submission timestamp.
    ///
    /// A single INSERT: the write lands whole or not at all, and a failure
    /// leaves prior state intact.
    pub async fn append(&self, new: NewEvaluation) -> Result<Evaluation> {
        let evaluation = Evaluation {
            id: Uuid::new_v4().to_string(),
            mdp_name: new.mdp_name,
            function_name: new.function_name,
            manager: new.manager,
            rotation: new.rotation,
            responses: new.responses,
            job_knowledge: new.scores.areas.job_knowledge,
            quality_of_work: new.scores.areas.quality_of_work,
            communication: new.scores.areas.communication,
            initiative: new.scores.areas.initiative,
            overall: new.scores.overall,
            submitted_at: Utc::now(),
            email_response: new.email_response,
            respondent_email: new.respondent_email,
        };

        let responses_json = serde_json::to_string(&evaluation.responses)
            .map_err(|e| Error::Persistence(format!("failed to encode responses: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO evaluations (
                id, mdp_name, function_name, manager, rotation, responses,
                job_knowledge, quality_of_work, communication, initiative,
                overall, submitted_at, email_response, respondent_email
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&evaluation.id)
        .bind(&evaluation.mdp_name)
        .bind(evaluation.function_name.as_str())
        .bind(&evaluation.manager)
        .bind(evaluation.rotation)
        .bind(&responses_json)
        .bind(evaluation.job_knowledge)
        .bind(evaluation.quality_of_work)
        .bind(evaluation.communication)
        .bind(evaluation.initiative)
        .bind(evaluation.overall)
        .bind(evaluation.submitted_at)
        .bind(evaluation.email_response)
        .bind(&evaluation.respondent_email)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

        Ok(evaluation)
    }

    /// Remove a record by id; false when no such record existed
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM evaluations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_evaluation(row: &SqliteRow) -> Result<Evaluation> {
    let function_raw: String = row.try_get("function_name")?;
    let function_name = function_raw
        .parse::<Function>()
        .map_err(|_| Error::Persistence(format!("corrupt function name: {}", function_raw)))?;

    let responses_json: String = row.try_get("responses")?;
    let responses: Responses = serde_json::from_str(&responses_json)
        .map_err(|e| Error::Persistence(format!("corrupt responses column: {}", e)))?;

    let submitted_at: DateTime<Utc> = row.try_get("submitted_at")?;

    Ok(Evaluation {
        id: row.try_get("id")?,
        mdp_name: row.try_get("mdp_name")?,
        function_name,
        manager: row.try_get("manager")?,
        rotation: row.try_get::<i64, _>("rotation")? as u32,
        responses,
        job_knowledge: row.try_get("job_knowledge")?,
        quality_of_work: row.try_get("quality_of_work")?,
        communication: row.try_get("communication")?,
        initiative: row.try_get("initiative")?,
        overall: row.try_get("overall")?,
        submitted_at,
        email_response: row.try_get("email_response")?,
        respondent_email: row.try_get("respondent_email")?,
    })
}
