//! Error surface shared by every client flow.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Failure reasons surfaced by the counter client.
///
/// Both view actions return these as structured results; nothing is
/// swallowed on one path and rethrown unhandled on the other.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("wallet keypair could not be loaded: {0}")]
    Wallet(String),

    #[error("failed to read interface description: {0}")]
    IdlIo(#[from] std::io::Error),

    #[error("malformed interface description: {0}")]
    IdlParse(#[from] serde_json::Error),

    #[error("interface description does not declare a program address")]
    MissingProgramAddress,

    #[error("invalid program address in interface description: {0}")]
    InvalidProgramAddress(#[from] solana_sdk::pubkey::ParsePubkeyError),

    #[error("interface description declares no instruction named {0:?}")]
    UnknownInstruction(String),

    #[error("no identity supplied for account role {0:?}")]
    MissingAccountRole(String),

    #[error("rpc request failed: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("airdrop was not confirmed in time")]
    AirdropTimeout,

    #[error("counter account {0} does not exist")]
    AccountNotFound(Pubkey),

    #[error("account data does not look like a counter account")]
    MalformedAccount,

    #[error("counter account is already initialized")]
    AlreadyInitialized,

    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("no counter has been created in this session")]
    NoCounter,

    #[error("a {0} call is already in flight")]
    InFlight(&'static str),
}
