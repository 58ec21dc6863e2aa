//! Provider/session handle: one configured connection per wallet session.
//!
//! The session bundles the RPC connection, the wallet's signing identity,
//! the interface description, and the resolved program address. It is built
//! once when the wallet connects and passed explicitly to every action.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_program,
    transaction::Transaction,
};
use tokio::time::sleep;
use tracing::debug;

use crate::{
    error::ClientError,
    idl::{account_discriminator, instruction_discriminator, Idl},
    program::CounterProgram,
};

/// Endpoint both artifacts point at: a local single-node test validator.
pub const LOCALNET_ENDPOINT: &str = "http://127.0.0.1:8899";

/// Connection settings for a program session.
pub struct SessionConfig {
    pub endpoint: String,
    pub commitment: CommitmentConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: LOCALNET_ENDPOINT.to_owned(),
            commitment: CommitmentConfig::processed(),
        }
    }
}

/// A callable handle to the deployed counter program.
pub struct ProgramSession {
    rpc: RpcClient,
    payer: Arc<Keypair>,
    idl: Idl,
    program_id: Pubkey,
}

impl ProgramSession {
    /// Opens a session from a connection config, the wallet's signing
    /// identity, and the program's interface description.
    pub fn connect(
        config: SessionConfig,
        payer: Arc<Keypair>,
        idl: Idl,
    ) -> Result<Self, ClientError> {
        let program_id = idl.program_address()?;
        let rpc = RpcClient::new_with_commitment(config.endpoint, config.commitment);
        Ok(Self {
            rpc,
            payer,
            idl,
            program_id,
        })
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Builds and submits one instruction named by the interface description.
    ///
    /// Account metas follow the IDL's declared order, with writable/signer
    /// flags taken from the IDL; `roles` maps each declared account name to
    /// an identity. The wallet payer always signs; `co_signers` adds the
    /// extra signers that account-creating calls need. Failed submissions
    /// are returned as errors, never retried.
    pub async fn invoke(
        &self,
        name: &str,
        roles: &[(&str, Pubkey)],
        co_signers: &[&Keypair],
    ) -> Result<Signature, ClientError> {
        let entry = self.idl.instruction(name)?;

        let mut metas = Vec::with_capacity(entry.accounts.len());
        for declared in &entry.accounts {
            let (_, pubkey) = roles
                .iter()
                .find(|(role, _)| *role == declared.name)
                .ok_or_else(|| ClientError::MissingAccountRole(declared.name.clone()))?;
            metas.push(if declared.is_mut {
                AccountMeta::new(*pubkey, declared.is_signer)
            } else {
                AccountMeta::new_readonly(*pubkey, declared.is_signer)
            });
        }

        let instruction = Instruction {
            program_id: self.program_id,
            accounts: metas,
            data: instruction_discriminator(name).to_vec(),
        };

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&Keypair> = vec![self.payer.as_ref()];
        signers.extend_from_slice(co_signers);
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &signers,
            blockhash,
        );

        let signature = self.rpc.send_and_confirm_transaction(&transaction).await?;
        debug!(%signature, instruction = name, "transaction confirmed");
        Ok(signature)
    }

    /// Requests a localnet airdrop for the payer and waits until it lands,
    /// so transaction fees and rent for the demo flows clear.
    pub async fn ensure_funded(&self, lamports: u64) -> Result<(), ClientError> {
        let signature = self
            .rpc
            .request_airdrop(&self.payer.pubkey(), lamports)
            .await?;

        let deadline = Instant::now() + Duration::from_secs(30);
        loop {
            if self.rpc.confirm_transaction(&signature).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ClientError::AirdropTimeout);
            }
            sleep(Duration::from_millis(500)).await;
        }
    }

    async fn fetch_counter_account(&self, address: &Pubkey) -> Result<u64, ClientError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        let account = response
            .value
            .ok_or(ClientError::AccountNotFound(*address))?;
        decode_count(&self.idl, &account.data)
    }
}

/// Reads the numeric count field out of raw account data.
///
/// Layout per the external program: an 8-byte account tag followed by the
/// count as a little-endian u64.
fn decode_count(idl: &Idl, data: &[u8]) -> Result<u64, ClientError> {
    let state = idl.accounts.first().ok_or(ClientError::MalformedAccount)?;
    let tag = account_discriminator(&state.name);
    if data.len() < 16 || data[..8] != tag {
        return Err(ClientError::MalformedAccount);
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&data[8..16]);
    Ok(u64::from_le_bytes(raw))
}

#[async_trait]
impl CounterProgram for ProgramSession {
    async fn create(&self, counter: &Keypair) -> Result<(), ClientError> {
        self.invoke(
            "create",
            &[
                ("baseAccount", counter.pubkey()),
                ("user", self.payer.pubkey()),
                ("systemProgram", system_program::id()),
            ],
            &[counter],
        )
        .await?;
        Ok(())
    }

    async fn increment(&self, counter: &Pubkey) -> Result<(), ClientError> {
        self.invoke("increment", &[("baseAccount", *counter)], &[])
            .await?;
        Ok(())
    }

    async fn fetch_count(&self, counter: &Pubkey) -> Result<u64, ClientError> {
        self.fetch_counter_account(counter).await
    }
}
