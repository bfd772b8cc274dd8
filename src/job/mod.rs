//! Job-status patches for the background analysis worker.
//!
//! A worker that runs analyses on behalf of queued jobs reports progress by
//! updating one row of the jobs table. [`JobPatch`] describes that update as
//! typed fields and renders a parameterized `UPDATE` statement. Column names
//! come only from [`JobColumn`]; every caller-provided value is a bind
//! parameter. Executing the statement is left to the caller's database handle.
//!
//! ```
//! use layoutscan::job::{JobPatch, JobStatus};
//!
//! let stmt = JobPatch::new()
//!     .status(JobStatus::Processing)
//!     .progress(10)
//!     .to_update()
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     stmt.sql,
//!     "UPDATE ai_jobs SET status = $2, started_at = NOW(), progress_percentage = $3 WHERE id = $1"
//! );
//! assert_eq!(stmt.params.len(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutscanError;
use crate::layout::LayoutDescriptor;

/// Default jobs table.
pub const JOBS_TABLE: &str = "ai_jobs";

/// Lifecycle state of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// The timestamp column stamped when a job enters this state, if any.
    pub fn timestamp_column(self) -> Option<JobColumn> {
        match self {
            JobStatus::Processing => Some(JobColumn::StartedAt),
            JobStatus::Completed | JobStatus::Failed => Some(JobColumn::CompletedAt),
            JobStatus::Pending => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns a patch may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobColumn {
    Status,
    StartedAt,
    CompletedAt,
    ProgressPercentage,
    OutputUrl,
    ResultData,
    ErrorMessage,
}

impl JobColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            JobColumn::Status => "status",
            JobColumn::StartedAt => "started_at",
            JobColumn::CompletedAt => "completed_at",
            JobColumn::ProgressPercentage => "progress_percentage",
            JobColumn::OutputUrl => "output_url",
            JobColumn::ResultData => "result_data",
            JobColumn::ErrorMessage => "error_message",
        }
    }
}

/// A value bound to a statement placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    /// Serialized to a JSON string when bound.
    Json(serde_json::Value),
}

/// A rendered update. `params[i]` binds to placeholder `$(i + 2)`; the job
/// id always binds to `$1`.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Partial update of one job row.
///
/// A field is written when it has been set, even to an empty value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobPatch {
    status: Option<JobStatus>,
    progress: Option<u32>,
    output_url: Option<String>,
    result_data: Option<serde_json::Value>,
    error_message: Option<String>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a job finished with the descriptor as its result.
    pub fn completed(descriptor: &LayoutDescriptor) -> Result<Self, LayoutscanError> {
        let result = serde_json::to_value(descriptor).map_err(LayoutscanError::JsonWrite)?;
        Ok(Self::new()
            .status(JobStatus::Completed)
            .progress(100)
            .result_data(result))
    }

    /// Marks a job failed with an error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new()
            .status(JobStatus::Failed)
            .error_message(message)
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Progress in percent, `0..=100`.
    pub fn progress(mut self, percent: u32) -> Self {
        self.progress = Some(percent);
        self
    }

    pub fn output_url(mut self, url: impl Into<String>) -> Self {
        self.output_url = Some(url.into());
        self
    }

    pub fn result_data(mut self, data: serde_json::Value) -> Self {
        self.result_data = Some(data);
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Returns true if no field has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the update against [`JOBS_TABLE`].
    pub fn to_update(&self) -> Result<Option<UpdateStatement>, LayoutscanError> {
        self.to_update_in(JOBS_TABLE)
    }

    /// Renders the update against `table`.
    ///
    /// Returns `Ok(None)` for an empty patch.
    ///
    /// # Errors
    /// Returns [`LayoutscanError::InvalidJobPatch`] if progress exceeds 100.
    pub fn to_update_in(
        &self,
        table: &'static str,
    ) -> Result<Option<UpdateStatement>, LayoutscanError> {
        if let Some(progress) = self.progress {
            if progress > 100 {
                return Err(LayoutscanError::InvalidJobPatch(format!(
                    "progress {} is outside 0..=100",
                    progress
                )));
            }
        }

        let mut assignments: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();
        let mut bind = |column: JobColumn, value: SqlParam| {
            params.push(value);
            // $1 is the job id.
            format!("{} = ${}", column.column_name(), params.len() + 1)
        };

        if let Some(status) = self.status {
            assignments.push(bind(JobColumn::Status, SqlParam::Text(status.as_str().into())));
            if let Some(stamp) = status.timestamp_column() {
                assignments.push(format!("{} = NOW()", stamp.column_name()));
            }
        }
        if let Some(progress) = self.progress {
            assignments.push(bind(
                JobColumn::ProgressPercentage,
                SqlParam::Int(progress.into()),
            ));
        }
        if let Some(url) = &self.output_url {
            assignments.push(bind(JobColumn::OutputUrl, SqlParam::Text(url.clone())));
        }
        if let Some(data) = &self.result_data {
            assignments.push(bind(JobColumn::ResultData, SqlParam::Json(data.clone())));
        }
        if let Some(message) = &self.error_message {
            assignments.push(bind(
                JobColumn::ErrorMessage,
                SqlParam::Text(message.clone()),
            ));
        }

        if assignments.is_empty() {
            return Ok(None);
        }

        Ok(Some(UpdateStatement {
            sql: format!(
                "UPDATE {} SET {} WHERE id = $1",
                table,
                assignments.join(", ")
            ),
            params,
        }))
    }
}
