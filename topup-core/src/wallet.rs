//! Wallet credential loading.
//!
//! The credential file is parsed only far enough to prove it is valid JSON;
//! its structure stays opaque to the rest of the tool. The public key label
//! comes from the file name, not from the key material.

use serde_json::Value;
use std::path::Path;

use crate::error::TopupError;

/// Opaque signer credential, held as the exact bytes read from disk.
#[derive(Debug, Clone)]
pub struct Wallet {
    bytes: Vec<u8>,
}

impl Wallet {
    /// Canonical credential bytes, used by adapters that derive request auth
    /// material from the credential.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A credential plus the public key label derived from its file name.
#[derive(Debug, Clone)]
pub struct LoadedWallet {
    pub wallet: Wallet,
    pub public_key: String,
}

/// Read and validate the wallet credential file.
pub fn load_wallet(path: &Path) -> Result<LoadedWallet, TopupError> {
    let bytes = std::fs::read(path).map_err(TopupError::wallet_load)?;
    serde_json::from_slice::<Value>(&bytes).map_err(TopupError::wallet_load)?;
    Ok(LoadedWallet {
        wallet: Wallet { bytes },
        public_key: wallet_label(path),
    })
}

/// Public key label for a wallet path: the file name with its extension
/// stripped. Also used on failure paths where the file was never read.
pub fn wallet_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_string())
}
