use tokio::io::BufReader;
use todo_manager::client::api::{ClientConfig, TodoApiClient};
use todo_manager::client::runtime::run;
use todo_manager::infrastructure::logging::init_client_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_client_logging();

    let config = ClientConfig::from_env();
    let api = TodoApiClient::new(config.api_url);
    info!(api_url = %api.base_url(), "Starting client");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run(&api, stdin, &mut stdout).await?;
    Ok(())
}
