//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// An empty or malformed network name, contract name, address, or
    /// constructor argument list
    InvalidArgument(String),
    /// No address is recorded for the requested (network, contract) pair
    NotFound(String),
    /// A store file exists but does not contain a valid name -> address mapping
    CorruptStore(String),
    /// Error reading a network's store file
    ReadStore(String),
    /// Error writing a network's store file
    WriteStore(String),
    /// Error parsing a contract compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
            ScriptError::NotFound(s) => write!(f, "contract not found: {}", s),
            ScriptError::CorruptStore(s) => write!(f, "corrupt store file: {}", s),
            ScriptError::ReadStore(s) => write!(f, "error reading store file: {}", s),
            ScriptError::WriteStore(s) => write!(f, "error writing store file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
