//! Constants used in the deploy scripts

/// The default directory holding the per-network address store files
pub const DEFAULT_DB_DIR: &str = "db";

/// The default directory holding the contract compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a contract ABI artifact
pub const ABI_EXTENSION: &str = "abi";

/// The extension of a contract creation-bytecode artifact
pub const BYTECODE_EXTENSION: &str = "bin";

/// The extension of a per-network store file
pub const STORE_EXTENSION: &str = "json";

/// The default number of milliseconds to wait before submitting a deployment
/// transaction, keeping a linear deployment script under the rate limits of
/// public RPC endpoints
pub const DEFAULT_PACING_DELAY_MS: u64 = 1000;

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// The name of the Swap contract method binding the new token
pub const SET_NEW_TOKEN_METHOD: &str = "setNewToken";
