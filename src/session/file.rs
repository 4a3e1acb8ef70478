//! File-backed session store.

use super::{SessionStore, SESSION_KEY};
use crate::error::SessionError;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Keeps the token in a small JSON object (`{"token": "..."}`) on disk.
///
/// The file is created with owner-only permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at `<dir>/session.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Store at `<platform data dir>/custody-admin/session.json`.
    pub fn default_location() -> Result<Self, SessionError> {
        let dir = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self::in_dir(dir.join("custody-admin")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .read_entries()?
            .remove(SESSION_KEY)
            .filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(SESSION_KEY.to_string(), token.to_string());
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            // An unreadable file cannot hold a usable token; drop it.
            Err(SessionError::Corrupt(_)) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        entries.remove(SESSION_KEY);
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
        } else {
            self.write_entries(&entries)?;
        }
        tracing::debug!(path = %self.path.display(), "session cleared");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
