use lakes_lib::Fetcher;
use tracing::info;

use crate::CliResult;

/// Print the article text for `name`. Nothing is stored.
pub async fn print(fetcher: &Fetcher, name: &str) -> CliResult<()> {
    info!("Fetching article for {name}");
    let text = fetcher.fetch(name).await?;

    println!("{text}");

    Ok(())
}
