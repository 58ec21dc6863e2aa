//! Seam between the client flows and the remote counter program.

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::error::ClientError;

/// The remote counter program, reduced to the three calls the client makes.
///
/// The real implementation talks to the network through a
/// [`ProgramSession`](crate::session::ProgramSession); tests inject
/// [`MockCounterChain`](crate::mock::MockCounterChain) instead.
#[async_trait]
pub trait CounterProgram: Send + Sync {
    /// Initializes a zeroed counter account at the given identity.
    ///
    /// The program enforces single initialization per identity; a second
    /// create for the same identity is rejected on chain.
    async fn create(&self, counter: &Keypair) -> Result<(), ClientError>;

    /// Adds exactly one to an existing counter account.
    async fn increment(&self, counter: &Pubkey) -> Result<(), ClientError>;

    /// Reads the current count from the account snapshot.
    async fn fetch_count(&self, counter: &Pubkey) -> Result<u64, ClientError>;
}

/// Identity of a counter created during this session.
///
/// Held only in memory: a fresh run starts with no counter even though
/// accounts created by earlier runs still exist on chain.
pub struct CounterHandle {
    keypair: Keypair,
}

impl CounterHandle {
    /// Generates a brand-new counter identity.
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// The keypair, needed as a co-signer when the account is created.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}
