use serde::{Deserialize, Serialize};
use std::path::Path;

/// Token and username kept on disk between runs so the user stays logged
/// in. Written after signup/login, removed on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Read saved credentials. A missing file just means nobody is logged
    /// in and yields `None`; an unreadable or malformed file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let credentials: Credentials = toml::from_str(&content)?;
        Ok(Some(credentials))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Delete the saved credentials, if any.
    pub fn clear<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.toml");

        let credentials = Credentials::new("alice", "secret-token");
        credentials.save(&path).unwrap();

        let loaded = Credentials::load(&path).unwrap();
        assert_eq!(loaded, Some(credentials));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let loaded = Credentials::load("/nonexistent/creds.toml").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"not valid {{{").unwrap();

        let result = Credentials::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.toml");

        Credentials::new("alice", "tok").save(&path).unwrap();
        assert!(path.exists());

        Credentials::clear(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never-created.toml");
        assert!(Credentials::clear(&path).is_ok());
    }
}
