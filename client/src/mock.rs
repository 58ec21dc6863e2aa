//! In-process stand-in for the external counter program.
//!
//! Reproduces the program's observable contract so the scripted
//! verification flow and the view tests run without a validator:
//! single initialization per identity, increment of exactly one, and
//! rejection of calls against unknown accounts.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tokio::time::sleep;

use crate::{error::ClientError, program::CounterProgram};

#[derive(Default)]
pub struct MockCounterChain {
    accounts: Mutex<HashMap<Pubkey, u64>>,
    fail_next_create: AtomicBool,
    latency: Duration,
}

impl MockCounterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artificial network round-trip to every call, so overlapping
    /// invocations can be provoked from tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Makes the next create call fail as a remote rejection.
    pub fn reject_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Direct snapshot of an account's count, bypassing the client path.
    pub fn count_of(&self, counter: &Pubkey) -> Option<u64> {
        self.accounts
            .lock()
            .expect("mock chain state poisoned")
            .get(counter)
            .copied()
    }

    /// Number of counter accounts ever created on this chain.
    pub fn account_total(&self) -> usize {
        self.accounts
            .lock()
            .expect("mock chain state poisoned")
            .len()
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CounterProgram for MockCounterChain {
    async fn create(&self, counter: &Keypair) -> Result<(), ClientError> {
        self.round_trip().await;
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(ClientError::Rejected(
                "create rejected by validator".to_owned(),
            ));
        }
        let mut accounts = self.accounts.lock().expect("mock chain state poisoned");
        if accounts.contains_key(&counter.pubkey()) {
            return Err(ClientError::AlreadyInitialized);
        }
        accounts.insert(counter.pubkey(), 0);
        Ok(())
    }

    async fn increment(&self, counter: &Pubkey) -> Result<(), ClientError> {
        self.round_trip().await;
        let mut accounts = self.accounts.lock().expect("mock chain state poisoned");
        let count = accounts
            .get_mut(counter)
            .ok_or(ClientError::AccountNotFound(*counter))?;
        // overflow behavior is the program's call; the mock rejects rather
        // than guessing saturating vs wrapping
        *count = count
            .checked_add(1)
            .ok_or_else(|| ClientError::Rejected("count overflow".to_owned()))?;
        Ok(())
    }

    async fn fetch_count(&self, counter: &Pubkey) -> Result<u64, ClientError> {
        self.round_trip().await;
        self.accounts
            .lock()
            .expect("mock chain state poisoned")
            .get(counter)
            .copied()
            .ok_or(ClientError::AccountNotFound(*counter))
    }
}
