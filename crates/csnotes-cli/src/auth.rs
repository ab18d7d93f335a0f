//! Session token persistence.
//!
//! macOS and Windows keep the token in the OS keychain. Elsewhere it lives in
//! `session_token` next to `config.json`, readable only by the owner.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(any(target_os = "macos", target_os = "windows"))]
use keyring::Entry;

use csnotes_core::{Error, LoginNavigator, Result};

#[cfg(any(target_os = "macos", target_os = "windows"))]
const KEYRING_SERVICE_NAME: &str = "csnotes-cli";
#[cfg(any(target_os = "macos", target_os = "windows"))]
const TOKEN_ACCOUNT: &str = "session_token";
const TOKEN_FILE_NAME: &str = "session_token";

#[derive(Debug, Clone)]
enum Backend {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    Keychain,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    backend: Backend,
}

impl TokenStore {
    /// The platform store for this machine.
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    pub fn open() -> Result<Self> {
        Ok(Self {
            backend: Backend::Keychain,
        })
    }

    /// The platform store for this machine.
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub fn open() -> Result<Self> {
        let dir = crate::config::config_dir()
            .ok_or_else(|| Error::SecureStorage("Failed to resolve CLI config directory".to_string()))?;
        Ok(Self::in_file(dir.join(TOKEN_FILE_NAME)))
    }

    pub const fn in_file(path: PathBuf) -> Self {
        Self {
            backend: Backend::File(path),
        }
    }

    pub fn load(&self) -> Result<Option<String>> {
        let token = match &self.backend {
            #[cfg(any(target_os = "macos", target_os = "windows"))]
            Backend::Keychain => match keychain_entry()?.get_password() {
                Ok(token) => Some(token),
                Err(keyring::Error::NoEntry) => None,
                Err(error) => return Err(Error::SecureStorage(error.to_string())),
            },
            Backend::File(path) => read_token_file(path)?,
        };
        Ok(token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        match &self.backend {
            #[cfg(any(target_os = "macos", target_os = "windows"))]
            Backend::Keychain => keychain_entry()?
                .set_password(token)
                .map_err(|error| Error::SecureStorage(error.to_string())),
            Backend::File(path) => write_token_file(path, token),
        }
    }

    pub fn clear(&self) -> Result<()> {
        match &self.backend {
            #[cfg(any(target_os = "macos", target_os = "windows"))]
            Backend::Keychain => match keychain_entry()?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(error) => Err(Error::SecureStorage(error.to_string())),
            },
            Backend::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(error) => Err(error.into()),
            },
        }
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn keychain_entry() -> Result<Entry> {
    Entry::new(KEYRING_SERVICE_NAME, TOKEN_ACCOUNT)
        .map_err(|error| Error::SecureStorage(error.to_string()))
}

fn read_token_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(token) => Ok(Some(token)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn write_token_file(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(token.as_bytes())?;
    Ok(())
}

/// Ends the terminal session: forgets the stored token and points the user
/// at `csnotes login`.
pub struct KeychainLoginNavigator {
    store: TokenStore,
}

impl KeychainLoginNavigator {
    pub const fn new(store: TokenStore) -> Self {
        Self { store }
    }
}

impl LoginNavigator for KeychainLoginNavigator {
    fn navigate_to_login(&self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!("Failed to clear stored session token: {}", error);
        }
        eprintln!("Signed out. Run `csnotes login` to sign in again.");
    }
}
