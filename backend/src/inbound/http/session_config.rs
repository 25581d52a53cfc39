//! Session cookie configuration.
//!
//! Loads the cookie signing key from disk and builds the cookie session
//! middleware that carries the redemption context between requests.

use std::path::{Path, PathBuf};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use cap_std::{ambient_authority, fs::Dir};
use tracing::warn;

/// Minimum key length accepted for cookie signing and encryption.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a temporary key when none is readable.
    Debug,
    /// Release builds require a readable key unless ephemeral keys are allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings resolved at startup.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while loading the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Path to the key file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Path to the key file.
        path: PathBuf,
        /// Observed key length in bytes.
        length: usize,
        /// Required key length in bytes.
        min_len: usize,
    },
}

/// Load the session key from `path`.
///
/// When the key cannot be used a temporary one is generated in debug builds
/// or when `allow_ephemeral` is set; otherwise the failure is returned.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::session_config::{BuildMode, load_session_key};
///
/// let missing = std::path::Path::new("/nonexistent/session_key");
/// assert!(load_session_key(missing, false, BuildMode::Release).is_err());
/// assert!(load_session_key(missing, true, BuildMode::Release).is_ok());
/// ```
pub fn load_session_key(
    path: &Path,
    allow_ephemeral: bool,
    mode: BuildMode,
) -> Result<Key, SessionConfigError> {
    match read_key(path) {
        Ok(key) => Ok(key),
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(error),
    }
}

fn read_key(path: &Path) -> Result<Key, SessionConfigError> {
    let read_error = |source| SessionConfigError::KeyRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "session key path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let bytes = dir.read(Path::new(file_name)).map_err(read_error)?;

    Key::try_from(bytes.as_slice()).map_err(|_| SessionConfigError::KeyTooShort {
        path: path.to_path_buf(),
        length: bytes.len(),
        min_len: SESSION_KEY_MIN_LEN,
    })
}

/// Build the cookie session middleware for the given settings.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_same_site(SameSite::Lax)
        .build()
}
