use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nostr_sdk::prelude::*;
use thiserror::Error;

const KEY_FILE: &str = "wallet_identity.key";

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid secret key in {path}: {reason}")]
    InvalidKey { path: PathBuf, reason: String },
}

pub fn key_path(data_dir: &Path) -> PathBuf {
    data_dir.join(KEY_FILE)
}

/// Load the local signing key, generating and persisting one on first run.
///
/// The key file holds the secret key as hex.
pub fn load_or_generate_keys(data_dir: &Path) -> Result<Keys, IdentityError> {
    let path = key_path(data_dir);
    let io_err = |source| IdentityError::Io {
        path: path.clone(),
        source,
    };

    match fs::read_to_string(&path) {
        Ok(contents) => Keys::parse(contents.trim()).map_err(|e| IdentityError::InvalidKey {
            path: path.clone(),
            reason: e.to_string(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let keys = Keys::generate();
            fs::create_dir_all(data_dir).map_err(io_err)?;
            fs::write(&path, keys.secret_key().to_secret_hex()).map_err(io_err)?;
            log::info!("generated new identity key at {}", path.display());
            Ok(keys)
        }
        Err(e) => Err(io_err(e)),
    }
}
