use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use secrets_loader::{CargoEnvSink, SecretLoader};

fn main() -> anyhow::Result<()> {
    // IMPORTANT: Initialize the ESP-IDF build system
    embuild::espidf::sysenv::output();

    secrets_loader::logging::init()?;

    // Find the workspace root
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let workspace_root = manifest_dir
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", manifest_dir.display()))?;

    let loader = SecretLoader::new(workspace_root);

    // Rerun the build script when secrets.env is created or changed
    println!("cargo:rerun-if-changed={}", loader.secrets_path().display());

    // A missing secrets.env is only a warning; the firmware then builds with the defaults
    loader.inject(&mut CargoEnvSink);

    Ok(())
}
