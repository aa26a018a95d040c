//! Deployment orchestration: the reuse-vs-redeploy policy, call pacing, and
//! persistence of deployment results

use std::{str::FromStr, time::Duration};

use ethers::abi::{Address, Token};
use tokio::time::sleep;
use tracing::info;

use crate::{
    cli::TokenContract,
    client::{ChainClient, ContractHandle},
    constants::DEFAULT_PACING_DELAY_MS,
    errors::ScriptError,
    store::AddressStore,
};

/// Decides, per network, whether a contract must be freshly deployed or a
/// previously recorded deployment can be reused, and records the results.
///
/// Deployments are issued strictly sequentially by the caller; the pacing
/// delay inserted before each deployment transaction keeps a linear deployment
/// script under the rate limits of public RPC endpoints. The reuse path makes
/// no deployment call and waits for no delay.
pub struct Deployer<C: ChainClient> {
    /// The chain client used to submit deployments and bind handles
    client: C,
    /// The persistent per-network address store
    store: AddressStore,
    /// The wait inserted before each deployment transaction
    pacing_delay: Duration,
    /// When true, every call deploys fresh and overwrites the recorded
    /// address; when false, an existing record short-circuits deployment
    redeploy: bool,
}

impl<C: ChainClient> Deployer<C> {
    /// Creates a deployer with the default policy: 1s pacing, redeploy on
    pub fn new(client: C, store: AddressStore) -> Self {
        Deployer {
            client,
            store,
            pacing_delay: Duration::from_millis(DEFAULT_PACING_DELAY_MS),
            redeploy: true,
        }
    }

    /// Overrides the pacing delay
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Overrides the redeploy policy
    pub fn with_redeploy(mut self, redeploy: bool) -> Self {
        self.redeploy = redeploy;
        self
    }

    /// Returns a handle bound to the recorded deployment of the contract on
    /// the given network.
    ///
    /// Fails with [`ScriptError::NotFound`] when no record exists; the caller
    /// must deploy first.
    pub async fn fetch_existing(
        &self,
        contract: TokenContract,
        network: &str,
    ) -> Result<C::Handle, ScriptError> {
        let name = contract.to_string();
        let address = self.store.read(network, &name)?.ok_or_else(|| {
            ScriptError::NotFound(format!("{} has no recorded deployment on {}", name, network))
        })?;

        self.client
            .contract_at(&name, parse_recorded_address(&address)?)
            .await
    }

    /// Deploys the contract with the given constructor arguments on the given
    /// network, or returns a handle bound to the recorded address when one
    /// exists and the redeploy policy is off.
    ///
    /// On the deploy path the resulting address is persisted before this
    /// returns, so a crash after return cannot lose the record; the store is
    /// left untouched when the deployment itself fails.
    pub async fn deploy_or_reuse(
        &self,
        contract: TokenContract,
        args: &[Token],
        network: &str,
    ) -> Result<C::Handle, ScriptError> {
        check_constructor_arity(contract, args)?;
        let name = contract.to_string();

        if let Some(address) = self.store.read(network, &name)? {
            if !self.redeploy {
                return self
                    .client
                    .contract_at(&name, parse_recorded_address(&address)?)
                    .await;
            }
        }

        info!("deploying {name} on {network}...");
        sleep(self.pacing_delay).await;

        let handle = self.client.deploy(&name, args).await?;
        let address = handle.address();
        self.store.write(network, &name, &format!("{address:#x}"))?;
        info!("deployed {name}, address: {address:#x}");

        Ok(handle)
    }
}

/// Rejects constructor argument lists whose length does not match the known
/// constructor of the contract
fn check_constructor_arity(contract: TokenContract, args: &[Token]) -> Result<(), ScriptError> {
    let expected = contract.constructor_arity();
    if args.len() != expected {
        return Err(ScriptError::InvalidArgument(format!(
            "{} takes {} constructor argument(s), got {}",
            contract,
            expected,
            args.len()
        )));
    }

    Ok(())
}

/// Parses an address string read back from the store
fn parse_recorded_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address).map_err(|e| {
        ScriptError::InvalidArgument(format!("invalid recorded address {}: {}", address, e))
    })
}
