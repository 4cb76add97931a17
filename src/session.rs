use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// User profile stored alongside the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
}

/// File-backed session record
///
/// Holds the opaque API token and the signed-in user's profile. Token
/// issuance is external; this only stores what the login flow hands back.
/// A missing or unreadable file yields an anonymous session.
#[derive(Debug, Clone)]
pub struct Session {
    // None keeps the session purely in memory
    path: Option<PathBuf>,
    data: StoredSession,
}

impl Session {
    /// Load a session from disk, falling back to anonymous
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    ::log::warn!("corrupt session file {}: {}", path.display(), e);
                    StoredSession::default()
                }
            },
            Err(_) => StoredSession::default(),
        };
        Self {
            path: Some(path),
            data,
        }
    }

    /// An in-memory session with no token
    pub fn anonymous() -> Self {
        Self {
            path: None,
            data: StoredSession::default(),
        }
    }

    /// An in-memory session carrying a token (mainly for tests)
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            path: None,
            data: StoredSession {
                token: Some(token.into()),
                user: None,
            },
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.token.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.data.user.as_ref()
    }

    /// Record a login and persist it
    pub fn store(&mut self, token: String, user: UserProfile) -> Result<(), Box<dyn Error>> {
        self.data.token = Some(token);
        self.data.user = Some(user);
        self.save()
    }

    /// Drop the token and remove the file
    pub fn clear(&mut self) -> Result<(), Box<dyn Error>> {
        self.data = StoredSession::default();
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<(), Box<dyn Error>> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.data)?)?;
        Ok(())
    }
}
