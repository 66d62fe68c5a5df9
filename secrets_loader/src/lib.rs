//! Build-time secrets for the firmware.
//!
//! Reads `firmware/secrets.env` below a project root, layers it over the
//! built-in defaults and hands four `DEFAULT_*` definitions to the build:
//!
//! ```no_run
//! use secrets_loader::{CargoEnvSink, SecretLoader};
//!
//! // In build.rs
//! SecretLoader::new("..").inject(&mut CargoEnvSink);
//! ```

pub mod flags;
pub mod loader;
pub mod logging;
pub mod secrets;
pub mod sink;

pub use flags::{BuildFlag, BuildFlagSet};
pub use loader::{SecretLoader, SECRETS_DIR, SECRETS_FILE};
pub use secrets::{parse_line, redact, SecretKey, SecretsMap};
pub use sink::{CargoEnvSink, DefinitionSink};
