//! `rmk progress` — print one dataset's progress snapshot as JSON.

use rmk_config::RowmarkConfig;
use rmk_persist::PersistenceCoordinator;
use rmk_session::SessionController;

use crate::cli::DatasetArg;

pub async fn handle(args: &DatasetArg, config: &RowmarkConfig) -> anyhow::Result<()> {
    super::authenticate(config).await?;
    let catalog = super::catalog(config)?;
    let dataset = super::resolve_dataset(&catalog, &args.dataset).await?;

    let coordinator = PersistenceCoordinator::new(catalog.clone());
    let mut controller =
        SessionController::new(catalog, coordinator, super::session_options(config));

    // Shutdown runs before `?`, same shape as the labeling loop.
    let outcome = controller.select_dataset(dataset).await;
    controller.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&outcome?)?);
    Ok(())
}
