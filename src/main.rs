use std::time::Duration;

use clap::Parser;
use deploy_scripts::{
    cli::Cli,
    client::{setup_client, HttpChainClient},
    deployer::Deployer,
    errors::ScriptError,
    store::AddressStore,
};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        db_dir,
        artifacts_dir,
        delay_ms,
        redeploy,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;
    let deployer = Deployer::new(
        HttpChainClient::new(client, artifacts_dir),
        AddressStore::new(db_dir),
    )
    .with_pacing_delay(Duration::from_millis(delay_ms))
    .with_redeploy(redeploy);

    command.run(deployer, &network).await
}
