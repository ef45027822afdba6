//! Invocation boundary: maps one pipeline run to a status-code response.

use serde_json::Value;
use tracing::{error, info};

use crate::pipeline::{PipelineError, StatsPipeline};

/// Result handed back to the invocation trigger.
///
/// Exactly two status codes exist: 200 on success, 500 on any failure. There
/// is no partial-success status even though persistence can partially
/// complete before failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

/// Run the pipeline once. The trigger payload is opaque and unused.
pub async fn handle(_event: Value, pipeline: &StatsPipeline) -> InvocationResponse {
    let response = response_for(pipeline.run().await);

    if response.status_code == 200 {
        info!(status_code = response.status_code, body = %response.body, "Invocation succeeded");
    } else {
        error!(status_code = response.status_code, body = %response.body, "Invocation failed");
    }

    response
}

pub(crate) fn response_for(result: Result<usize, PipelineError>) -> InvocationResponse {
    match result {
        Ok(count) => InvocationResponse {
            status_code: 200,
            body: format!("Successfully updated NBA stats ({} teams)", count),
        },
        Err(e @ PipelineError::Fetch) => InvocationResponse {
            status_code: 500,
            body: e.to_string(),
        },
        Err(e) => InvocationResponse {
            status_code: 500,
            body: format!("Error: {}", e),
        },
    }
}
