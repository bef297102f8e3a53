// --- File: crates/banklink_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, later wins:
/// 1. `config/default` (any format the config crate understands)
/// 2. `config/{RUN_ENV}` (RUN_ENV defaults to "debug")
/// 3. environment variables prefixed with `{PREFIX}__` (PREFIX defaults to "BANKLINK")
///
/// Vendor API secrets are intentionally NOT part of [`AppConfig`]; they are read
/// straight from the process environment where the respective client is built.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BANKLINK".to_string());

    let workspace_root = workspace_root();
    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{run_env}"));

    tracing::debug!(
        default = %default_path.display(),
        env = %env_path.display(),
        "loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    builder.build()?.try_deserialize()
}

/// Resolves the workspace root so config files are found regardless of which
/// member crate the process was started from. Falls back to the current
/// directory when not running under cargo.
fn workspace_root() -> PathBuf {
    env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.ancestors().nth(2).map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment exactly once.
///
/// The file defaults to `.env` and can be redirected with `DOTENV_OVERRIDE`.
/// A missing file is not an error.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        let dotenv_path =
            env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());
        dotenv::from_filename(&dotenv_path).ok();
    });
}
