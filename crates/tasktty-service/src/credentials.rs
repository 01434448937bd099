use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the token file in the user's home directory.
pub const TOKEN_FILE_NAME: &str = ".todoist";

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("no credential file at {0}")]
    Missing(PathBuf),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("credential file {0} is empty")]
    Empty(PathBuf),

    #[error("cannot locate the home directory")]
    NoHome,
}

pub fn default_token_path() -> Result<PathBuf, CredentialsError> {
    dirs::home_dir()
        .map(|home| home.join(TOKEN_FILE_NAME))
        .ok_or(CredentialsError::NoHome)
}

/// Reads the API token: the whole file, trimmed.
pub fn read_token(path: &Path) -> Result<String, CredentialsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CredentialsError::Missing(path.to_path_buf())
        } else {
            CredentialsError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(CredentialsError::Empty(path.to_path_buf()));
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        std::fs::write(&path, "  0123456789abcdef\n").unwrap();
        assert_eq!(read_token(&path).unwrap(), "0123456789abcdef");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        assert!(matches!(read_token(&path), Err(CredentialsError::Missing(_))));
    }

    #[test]
    fn blank_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        std::fs::write(&path, " \n\t").unwrap();
        assert!(matches!(read_token(&path), Err(CredentialsError::Empty(_))));
    }

    #[test]
    fn default_path_lives_in_home() {
        if let Ok(path) = default_token_path() {
            assert!(path.ends_with(TOKEN_FILE_NAME));
        }
    }
}
