//! Auth context and token storage
//!
//! The bearer token lives in an explicit [`AuthContext`] handed to the
//! client, never in ambient global state. Persistence is delegated to a
//! [`TokenStore`]; the context keeps the live copy in memory and writes
//! through on every change.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

/// Errors raised by token stores
#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Token file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No data directory available for the token file")]
    NoDataDir,
}

/// Somewhere a bearer token survives between runs
pub trait TokenStore: Send + Sync {
    /// Read the stored token, `None` if nothing is stored
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Process-local store, forgotten on exit
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Token kept in a single file under the user's data directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/podium/token`
    pub fn default_path() -> Result<PathBuf, TokenStoreError> {
        dirs::data_local_dir()
            .map(|dir| dir.join("podium").join("token"))
            .ok_or(TokenStoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Owner-only from creation: the file holds a credential
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;

        // `mode` only applies to new files; tighten one left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        file.write_all(token.as_bytes()).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, "Saved bearer token");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Removed bearer token");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

struct AuthInner {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

/// Shared handle to the current bearer token.
///
/// Clones share the same token; `clear_token` through one clone is seen by
/// every client holding another.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<AuthInner>,
}

impl AuthContext {
    /// Unauthenticated context backed by memory only
    pub fn new() -> Self {
        Self::from_parts(None, Box::new(MemoryTokenStore::new()))
    }

    /// Memory-only context holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::from_parts(
            Some(token.clone()),
            Box::new(MemoryTokenStore::with_token(token)),
        )
    }

    /// Context backed by a persistent store, primed from its current content
    pub fn persistent(store: impl TokenStore + 'static) -> Result<Self, TokenStoreError> {
        let token = store.load()?;
        Ok(Self::from_parts(token, Box::new(store)))
    }

    fn from_parts(token: Option<String>, store: Box<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                token: RwLock::new(token),
                store,
            }),
        }
    }

    /// Current token, if signed in
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the token, persisting it first
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), TokenStoreError> {
        let token = token.into();
        self.inner.store.save(&token)?;
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// Forget the token.
    ///
    /// The in-memory copy is dropped even when the store fails, so later
    /// requests go out unauthenticated either way.
    pub fn clear_token(&self) -> Result<(), TokenStoreError> {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.inner.store.clear()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
