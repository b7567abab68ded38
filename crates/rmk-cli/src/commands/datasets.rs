//! `rmk datasets` — list candidate datasets in the remote store.

use rmk_config::RowmarkConfig;

pub async fn handle(config: &RowmarkConfig) -> anyhow::Result<()> {
    let identity = super::authenticate(config).await?;
    let catalog = super::catalog(config)?;

    let datasets = catalog.list().await?;
    if datasets.is_empty() {
        println!("no datasets found for {}", identity.email);
        return Ok(());
    }

    for dataset in datasets {
        println!("{}", dataset.name);
    }
    Ok(())
}
