use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{ProgressMeter, ProgressScorer, TaskEvent, TaskOutcome};
use crate::brew::{Brew, BrewError};

/// Runs `brew install <pkg>` to completion, publishing one `Output` event per
/// line and a final `Finished` event.
pub async fn run_install<S, E>(brew: Brew, pkg: String, scorer: S, tx: mpsc::UnboundedSender<E>)
where
    S: ProgressScorer,
    E: From<TaskEvent>,
{
    info!(%pkg, "install started");
    let outcome = match stream_install(&brew, &pkg, scorer, &tx).await {
        Ok(code) => {
            info!(%pkg, code, "install exited");
            TaskOutcome::Exited(code)
        }
        Err(err) => {
            warn!(%pkg, error = %err, "install errored");
            TaskOutcome::Errored(err.to_string())
        }
    };
    let _ = tx.send(TaskEvent::Finished { pkg, outcome }.into());
}

async fn stream_install<S, E>(
    brew: &Brew,
    pkg: &str,
    scorer: S,
    tx: &mpsc::UnboundedSender<E>,
) -> Result<i32, BrewError>
where
    S: ProgressScorer,
    E: From<TaskEvent>,
{
    let mut stream = brew.stream(&["install", pkg])?;
    let mut meter = ProgressMeter::new(scorer);

    while let Some(line) = stream.next_line().await? {
        let progress = meter.observe(&line);
        let event = TaskEvent::Output {
            pkg: pkg.to_string(),
            line,
            progress,
        };
        let _ = tx.send(event.into());
    }

    let code = stream.wait().await?;
    debug!(%pkg, code, estimate = meter.value(), "install output closed");
    Ok(code)
}
