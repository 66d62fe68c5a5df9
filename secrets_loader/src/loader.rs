use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::*;

use crate::flags::BuildFlagSet;
use crate::secrets::{redact, SecretKey, SecretsMap};
use crate::sink::DefinitionSink;

/// Directory below the project root that holds the secrets file.
pub const SECRETS_DIR: &str = "firmware";
/// Name of the secrets file.
pub const SECRETS_FILE: &str = "secrets.env";

/// Reads `<root>/firmware/secrets.env` and turns it into build definitions.
#[derive(Debug, Clone)]
pub struct SecretLoader {
    root: PathBuf,
}

impl SecretLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the secrets file is expected, whether or not it exists.
    pub fn secrets_path(&self) -> PathBuf {
        self.root.join(SECRETS_DIR).join(SECRETS_FILE)
    }

    /// Builds the secrets map: the defaults, overwritten by the file if there
    /// is one. A missing file only logs a warning; a file that cannot be read
    /// leaves the defaults untouched.
    pub fn load(&self) -> SecretsMap {
        let path = self.secrets_path();
        let mut secrets = SecretsMap::default();

        if !path.exists() {
            warn!("{} not found, using empty defaults", path.display());
            return secrets;
        }

        let bytes = match read_secrets(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Ignoring unreadable secrets file: {:#}", e);
                return secrets;
            }
        };
        secrets.merge_bytes(&bytes);

        info!(
            "Loaded secrets from {}: WIFI_SSID={}, WEATHER_LOCATION={}",
            path.display(),
            redact(secrets.value(SecretKey::WifiSsid)),
            secrets.value(SecretKey::WeatherLocation)
        );
        secrets
    }

    /// Loads the secrets and appends one definition per required key to
    /// `sink`, in fixed key order.
    pub fn inject<S: DefinitionSink + ?Sized>(&self, sink: &mut S) -> BuildFlagSet {
        let flags = BuildFlagSet::from_secrets(&self.load());
        for flag in &flags {
            sink.append_flag(flag);
        }
        info!("Injected {} build flags from {}", flags.len(), SECRETS_FILE);
        flags
    }
}

fn read_secrets(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Error reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_path_is_below_firmware_dir() {
        let loader = SecretLoader::new("/work/project");
        assert_eq!(
            loader.secrets_path(),
            PathBuf::from("/work/project/firmware/secrets.env")
        );
    }

    #[test]
    fn missing_root_falls_back_to_defaults() {
        let loader = SecretLoader::new("/this/path/does/not/exist");
        assert_eq!(loader.load(), SecretsMap::default());
    }

    #[test]
    fn read_error_names_the_file() {
        let err = read_secrets(Path::new("/this/path/does/not/exist/secrets.env")).unwrap_err();
        assert!(format!("{:#}", err).contains("secrets.env"));
    }
}
