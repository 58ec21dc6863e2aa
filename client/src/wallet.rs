//! Wallet connection reduced to its contract: a signing identity.
//!
//! The actual key handling stays in the SDK; this module only decides
//! where the identity comes from. A successful `connect` is the
//! "connected" status of the view.

use std::{path::Path, sync::Arc};

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};

use crate::error::ClientError;

pub struct LocalWallet {
    keypair: Arc<Keypair>,
}

impl LocalWallet {
    /// Loads the keypair file if one is given, otherwise generates a
    /// throwaway identity for this session.
    pub fn connect(keypair_path: Option<&Path>) -> Result<Self, ClientError> {
        let keypair = match keypair_path {
            Some(path) => read_keypair_file(path)
                .map_err(|err| ClientError::Wallet(format!("{}: {err}", path.display())))?,
            None => Keypair::new(),
        };
        Ok(Self {
            keypair: Arc::new(keypair),
        })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// The signing identity, shared with the program session as fee payer.
    pub fn signer(&self) -> Arc<Keypair> {
        self.keypair.clone()
    }
}
