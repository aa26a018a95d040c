//! Scripts for deploying and wiring up the token swap contracts.
//!
//! Deployed addresses are cached in a per-network store file, so a rerun of a
//! deployment script can reuse prior deployments instead of repeating them.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod client;
mod commands;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod store;
