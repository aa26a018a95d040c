//! Implementations of the deploy script commands

use std::str::FromStr;

use ethers::{
    abi::{Address, Token},
    providers::Middleware,
};
use tracing::info;

use crate::{
    cli::{DeployArgs, DeploySwapArgs, ShowAddressArgs, TokenContract},
    client::HttpChainClient,
    constants::SET_NEW_TOKEN_METHOD,
    deployer::Deployer,
    errors::ScriptError,
};

/// Deploys the full swap system on the target network.
///
/// Pipeline: resolve the old token (use the provided address or deploy a
/// fresh one), deploy the swap bound to it, deploy the new token with its
/// allocation recipients, then point the swap at the new token.
pub async fn deploy_swap_system<M: Middleware + 'static>(
    args: DeploySwapArgs,
    deployer: &Deployer<HttpChainClient<M>>,
    network: &str,
) -> Result<(), ScriptError> {
    let old_token = match args.old_token {
        Some(address) => parse_address_arg(&address)?,
        None => deployer
            .deploy_or_reuse(TokenContract::OldToken, &[], network)
            .await?
            .address(),
    };

    let airdrop = parse_address_arg(&args.airdrop)?;
    let grants = parse_address_arg(&args.grants)?;
    let liquid = parse_address_arg(&args.liquid)?;
    let treasury = parse_address_arg(&args.treasury)?;

    let swap = deployer
        .deploy_or_reuse(TokenContract::Swap, &[Token::Address(old_token)], network)
        .await?;

    let new_token = deployer
        .deploy_or_reuse(
            TokenContract::LadysToken,
            &[
                Token::Address(swap.address()),
                Token::Address(airdrop),
                Token::Address(grants),
                Token::Address(liquid),
                Token::Address(treasury),
            ],
            network,
        )
        .await?;

    swap.method::<_, ()>(SET_NEW_TOKEN_METHOD, new_token.address())
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    info!("swap system ready, new token at {:#x}", new_token.address());

    Ok(())
}

/// Deploys (or reuses) a single contract with address-valued constructor
/// arguments
pub async fn deploy_contract<M: Middleware + 'static>(
    args: DeployArgs,
    deployer: &Deployer<HttpChainClient<M>>,
    network: &str,
) -> Result<(), ScriptError> {
    let tokens = args
        .args
        .iter()
        .map(|arg| Ok(Token::Address(parse_address_arg(arg)?)))
        .collect::<Result<Vec<_>, ScriptError>>()?;

    let contract = deployer
        .deploy_or_reuse(args.contract, &tokens, network)
        .await?;
    println!("{} on {}: {:#x}", args.contract, network, contract.address());

    Ok(())
}

/// Prints the cached address of a contract on the target network
pub async fn show_address<M: Middleware + 'static>(
    args: ShowAddressArgs,
    deployer: &Deployer<HttpChainClient<M>>,
    network: &str,
) -> Result<(), ScriptError> {
    let contract = deployer.fetch_existing(args.contract, network).await?;
    println!("{} on {}: {:#x}", args.contract, network, contract.address());

    Ok(())
}

/// Parses a CLI-supplied hex address
fn parse_address_arg(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address)
        .map_err(|e| ScriptError::InvalidArgument(format!("invalid address {}: {}", address, e)))
}
