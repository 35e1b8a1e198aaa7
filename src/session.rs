//! User session
//!
//! Holds the auth token handed out by the backend's auth flow. It is loaded
//! once at startup and passed into the app; nothing reads it from ambient
//! state afterwards. Navigation (sending the user to the auth page) is a
//! value the caller acts on, not a side effect.

use crate::config::{SecretString, wizard_home};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the app should start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// No token: show the auth page
    Auth,
    /// Token present: show the wizard
    Dashboard,
}

/// A navigation request produced by the app for its caller to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Open this URL (the backend auth entry point) in a browser
    Redirect(String),
}

#[derive(Serialize, Deserialize, Default)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
    path: Option<PathBuf>,
}

impl Session {
    /// Default session file: ~/.prompt-wizard/session.toml
    pub fn default_path() -> PathBuf {
        wizard_home().join("session.toml")
    }

    /// In-memory session, never persisted
    pub fn ephemeral(token: Option<SecretString>) -> Self {
        Self { token, path: None }
    }

    /// Load the session file. A missing file is an empty session.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No session file at {:?}", path);
            return Ok(Self {
                token: None,
                path: Some(path),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        let file: SessionFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {:?}", path))?;

        let token = file
            .token
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::new);
        tracing::debug!("Session loaded (token present: {})", token.is_some());
        Ok(Self {
            token,
            path: Some(path),
        })
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Which screen to start on
    pub fn route(&self) -> Route {
        if self.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Auth
        }
    }

    /// Store a new token and persist it
    pub fn set_token(&mut self, token: SecretString) -> Result<()> {
        if token.is_empty() {
            anyhow::bail!("Token must not be empty");
        }
        self.token = Some(token);
        self.persist()
    }

    /// Forget the token and persist the empty session
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_session_file(path, self.token.as_ref())
    }
}

fn write_session_file(path: &Path, token: Option<&SecretString>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create session directory: {:?}", parent))?;
    }
    let file = SessionFile {
        token: token.map(|t| t.expose_secret().to_string()),
    };
    let contents = toml::to_string(&file).context("Failed to serialize session")?;
    let mut out = open_private(path)
        .with_context(|| format!("Failed to open session file: {:?}", path))?;
    out.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write session file: {:?}", path))?;

    tracing::info!("Session saved to {:?}", path);
    Ok(())
}

/// Create or truncate the file with owner-only permissions
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten files left by older versions
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}
