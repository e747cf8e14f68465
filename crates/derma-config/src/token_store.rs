// Durable admin token stores: a private file in the data dir, or the
// system keyring.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use derma_core::{ADMIN_TOKEN_KEY, CoreError, TokenStore};

use crate::{KEYRING_SERVICE, TokenStorage, data_dir};

fn storage_err(err: impl std::fmt::Display) -> CoreError {
    CoreError::Storage {
        message: err.to_string(),
    }
}

/// Token kept in `{dir}/adminToken`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(ADMIN_TOKEN_KEY),
        }
    }

    /// The default location for `profile_name`.
    pub fn for_profile(profile_name: &str) -> Self {
        Self::new(data_dir().join("profiles").join(profile_name))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let token = text.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(storage_err)?;
        file.write_all(token.expose_secret().as_bytes())
            .map_err(storage_err)?;
        debug!(path = %self.path.display(), "admin token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(e)),
        }
    }
}

/// Token kept in the system keyring as `{profile}/adminToken`.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    user: String,
}

impl KeyringTokenStore {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            user: format!("{profile_name}/{ADMIN_TOKEN_KEY}"),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, CoreError> {
        keyring::Entry::new(KEYRING_SERVICE, &self.user).map_err(storage_err)
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(SecretString::from(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), CoreError> {
        self.entry()?
            .set_password(token.expose_secret())
            .map_err(storage_err)
    }

    fn clear(&self) -> Result<(), CoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(storage_err(e)),
        }
    }
}

/// The configured store for `profile_name`.
pub fn token_store(storage: TokenStorage, profile_name: &str) -> Arc<dyn TokenStore> {
    match storage {
        TokenStorage::File => Arc::new(FileTokenStore::for_profile(profile_name)),
        TokenStorage::Keyring => Arc::new(KeyringTokenStore::for_profile(profile_name)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("clinic"));

        assert!(store.load().unwrap().is_none());
        store.save(&SecretString::from("tok-abc")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "tok-abc");
        assert!(store.path().ends_with("adminToken"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        store.save(&SecretString::from("tok")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn blank_file_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        fs::write(store.path(), "\n").unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
