//! `rmk label` — the interactive labeling loop.
//!
//! Pull-based: each iteration asks the session controller for the current
//! record, prompts for one of the allowed labels, and submits. Persistence
//! happens in the background; the prompt never waits on the remote store.

use std::future::Future;
use std::io;

use rmk_config::RowmarkConfig;
use rmk_core::{DatasetIdentity, LabelValue, ProgressSnapshot};
use rmk_persist::PersistenceCoordinator;
use rmk_session::{SessionController, SessionError};
use rmk_table::Record;

use crate::cli::LabelArgs;

pub async fn handle(args: &LabelArgs, config: &RowmarkConfig) -> anyhow::Result<()> {
    let identity = super::authenticate(config).await?;
    let catalog = super::catalog(config)?;
    let dataset = super::resolve_dataset(&catalog, &args.dataset).await?;

    println!("labeling '{}' as {}", dataset.name, identity.email);

    let coordinator = PersistenceCoordinator::new(catalog.clone());
    let mut controller =
        SessionController::new(catalog, coordinator, super::session_options(config));
    let label_column = config.labeling.label_column.as_str();

    // Queued snapshots must drain even when the loop errors out, or labels
    // the reviewer already submitted would be lost on exit.
    let outcome = session_loop(&mut controller, dataset, label_column, read_line).await;
    controller.shutdown().await;
    outcome
}

/// The loop proper. Takes its input source as a parameter so the error paths
/// can be driven from tests; `handle` passes [`read_line`].
async fn session_loop<F, Fut>(
    controller: &mut SessionController,
    dataset: DatasetIdentity,
    label_column: &str,
    mut next_input: F,
) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<Option<String>>>,
{
    let mut progress = controller.select_dataset(dataset).await?;

    loop {
        let Some(record) = controller.current_record()? else {
            println!("all {} records labeled — nothing left to do", progress.total);
            break;
        };

        print_record(&record, label_column);
        print_progress(&progress);
        print_options(&progress);

        let Some(input) = next_input().await? else {
            break; // EOF
        };

        match input.as_str() {
            "q" => break,
            "r" => {
                progress = controller.reload().await?;
            }
            other => match parse_label(other) {
                Some(label) => match controller.submit_label(label) {
                    Ok(updated) => progress = updated,
                    Err(
                        error @ (SessionError::BudgetExceeded { .. }
                        | SessionError::InvalidSubmission(_)),
                    ) => println!("{error}"),
                    Err(error) => return Err(error.into()),
                },
                None => println!("unrecognized input '{other}'"),
            },
        }
    }

    Ok(())
}

fn parse_label(input: &str) -> Option<LabelValue> {
    input.parse::<u8>().ok().and_then(LabelValue::from_code)
}

fn print_record(record: &Record, label_column: &str) {
    println!();
    for (name, value) in &record.fields {
        if name == label_column {
            continue;
        }
        println!("  {name}: {value}");
    }
}

fn print_progress(progress: &ProgressSnapshot) {
    println!(
        "record {} of {} — accepted {}, rejected {}, unsure {}",
        progress.cursor + 1,
        progress.total,
        progress.accept_count,
        progress.reject_count,
        progress.unsure_count,
    );
}

fn print_options(progress: &ProgressSnapshot) {
    let mut options: Vec<String> = progress
        .allowed_labels
        .iter()
        .map(|label| format!("[{}] {label}", label.code()))
        .collect();
    options.push("[r] reload".to_string());
    options.push("[q] quit".to_string());
    println!("{}", options.join("  "));
}

/// Read one trimmed line from stdin, `None` on EOF.
async fn read_line() -> anyhow::Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        Ok::<_, io::Error>((read > 0).then(|| line.trim().to_string()))
    })
    .await??;
    Ok(line)
}
