//! The chain-client seam between the orchestrator and the RPC layer

use std::{borrow::Borrow, fs, path::PathBuf, str::FromStr, sync::Arc};

use async_trait::async_trait;
use ethers::{
    abi::{Abi, Address, Token},
    contract::{Contract, ContractFactory, ContractInstance},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::Bytes,
};

use crate::{
    constants::{ABI_EXTENSION, BYTECODE_EXTENSION, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
};

/// A live reference to a deployed contract, owned by the caller
pub trait ContractHandle {
    /// The on-chain address the handle is bound to
    fn address(&self) -> Address;
}

impl<B, M> ContractHandle for ContractInstance<B, M>
where
    B: Borrow<M>,
    M: Middleware,
{
    fn address(&self) -> Address {
        ContractInstance::address(self)
    }
}

/// The subset of chain operations the deployer needs: submitting a deployment
/// transaction and binding a handle to an already-deployed address.
///
/// Transaction-level concerns (gas, nonces, confirmation waiting, timeouts)
/// belong to the implementation; failures are surfaced unmodified.
#[async_trait]
pub trait ChainClient {
    /// The contract handle type returned by this client
    type Handle: ContractHandle + Send + Sync;

    /// Deploys the named contract with the given constructor arguments,
    /// blocking until a deployed instance is obtained
    async fn deploy(&self, name: &str, args: &[Token]) -> Result<Self::Handle, ScriptError>;

    /// Binds a handle to an already-deployed instance of the named contract
    async fn contract_at(&self, name: &str, address: Address)
        -> Result<Self::Handle, ScriptError>;
}

/// A chain client backed by an ethers middleware stack.
///
/// Contract ABI and creation bytecode are loaded from a local artifacts
/// directory by contract name (`<Name>.abi` / `<Name>.bin`); the contracts
/// themselves are compiled elsewhere and treated as opaque deployable units.
pub struct HttpChainClient<M: Middleware> {
    /// The signing middleware used to submit transactions
    client: Arc<M>,
    /// The directory containing the compilation artifacts
    artifacts_dir: PathBuf,
}

impl<M: Middleware + 'static> HttpChainClient<M> {
    /// Creates a client from a middleware stack and an artifacts directory
    pub fn new(client: Arc<M>, artifacts_dir: impl Into<PathBuf>) -> Self {
        HttpChainClient {
            client,
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// Loads the ABI artifact for the named contract
    fn load_abi(&self, name: &str) -> Result<Abi, ScriptError> {
        let path = self.artifacts_dir.join(name).with_extension(ABI_EXTENSION);
        let raw = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&raw).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }

    /// Loads the creation bytecode artifact for the named contract
    fn load_bytecode(&self, name: &str) -> Result<Bytes, ScriptError> {
        let path = self
            .artifacts_dir
            .join(name)
            .with_extension(BYTECODE_EXTENSION);
        let raw = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        Bytes::from_str(raw.trim()).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }
}

#[async_trait]
impl<M: Middleware + 'static> ChainClient for HttpChainClient<M> {
    type Handle = Contract<M>;

    async fn deploy(&self, name: &str, args: &[Token]) -> Result<Self::Handle, ScriptError> {
        let abi = self.load_abi(name)?;
        let bytecode = self.load_bytecode(name)?;

        let factory = ContractFactory::new(abi, bytecode, self.client.clone());
        let contract = factory
            .deploy_tokens(args.to_vec())
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(contract)
    }

    async fn contract_at(
        &self,
        name: &str,
        address: Address,
    ) -> Result<Self::Handle, ScriptError> {
        let abi = self.load_abi(name)?;

        Ok(Contract::new(address, abi, self.client.clone()))
    }
}

/// Sets up the client with which to deploy and interact with the contracts,
/// from the deployer's private key and the network RPC url
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}
