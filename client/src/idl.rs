//! Serde model of the externally supplied interface description (IDL).
//!
//! The document is opaque input: it names the deployed program's address,
//! its instructions, and the shape of the account they operate on. The
//! client never produces or edits it.

use std::{fs, path::Path, str::FromStr};

use serde::Deserialize;
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::error::ClientError;

/// Top-level interface description document.
#[derive(Debug, Clone, Deserialize)]
pub struct Idl {
    pub version: String,
    pub name: String,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlAccount>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
}

/// One callable instruction and the accounts it expects, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub accounts: Vec<IdlInstructionAccount>,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

/// A named account role with its writable/signer flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlInstructionAccount {
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
}

/// Shape of an account type owned by the program.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlTypeDef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    pub address: String,
}

impl Idl {
    /// Parses an interface description from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads an interface description from a file on disk.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Resolves the deployed program's on-chain address from the document.
    pub fn program_address(&self) -> Result<Pubkey, ClientError> {
        let metadata = self
            .metadata
            .as_ref()
            .ok_or(ClientError::MissingProgramAddress)?;
        Ok(Pubkey::from_str(&metadata.address)?)
    }

    /// Looks up a declared instruction by name.
    pub fn instruction(&self, name: &str) -> Result<&IdlInstruction, ClientError> {
        self.instructions
            .iter()
            .find(|instruction| instruction.name == name)
            .ok_or_else(|| ClientError::UnknownInstruction(name.to_owned()))
    }
}

/// 8-byte tag the program expects at the start of instruction data.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

/// 8-byte tag at the start of every account the program owns.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator("account", name)
}

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&digest[..8]);
    tag
}
