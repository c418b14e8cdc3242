//! `forefront run` - one query end to end

use crate::server::build_orchestrator;
use crate::server::config::AppConfig;
use forefront_core::{format_error_for_cli, ExecuteRequest, ExecutionStatus};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Arguments of the `run` command
#[derive(Debug)]
pub struct RunOptions {
    pub query: String,
    pub model: Option<String>,
    pub user: String,
    pub json: bool,
}

/// Execute the query, cancelling between steps on Ctrl+C
pub async fn run(config: &AppConfig, options: RunOptions) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling after the current step");
            watcher.cancel();
        }
    });

    let mut request = ExecuteRequest::new(options.query, options.user);
    if let Some(model) = options.model {
        request = request.with_model(model);
    }

    let response = match orchestrator.execute_with_cancel(request, cancel).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", format_error_for_cli(&e));
            anyhow::bail!("execution failed");
        }
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.final_content());
    }

    match response.status {
        ExecutionStatus::Failed => {
            let reason = response.error.unwrap_or_else(|| "unknown error".to_string());
            anyhow::bail!("execution failed: {reason}")
        }
        ExecutionStatus::Cancelled => anyhow::bail!("execution cancelled"),
        _ => Ok(()),
    }
}
