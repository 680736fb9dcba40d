// Credential loading and the environment factory. This is the entry point
// scripts use: name an environment, get back a ready `Launchpad` handle.
// A credential file under the home directory is reused when present;
// otherwise the interactive handshake runs once and its result is saved.
// "File not found" is the only error handled here; everything else is
// surfaced to the caller immediately.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::api::{AuthGateway, Credentials, HttpGateway, Launchpad};
use crate::env::{self, LpSystem};
use crate::error::LpError;

/// Default consumer name presented during authorization, matching the
/// historical scripts.
pub const DEFAULT_APP_NAME: &str = "just testing";

/// The shared response-cache directory, if the caller asked for caching,
/// the environment allows it, and the directory already exists. It is
/// never created here; a missing directory just disables caching.
pub fn cache_dir(home: &Path, system: &LpSystem, use_cache: bool) -> Option<PathBuf> {
    if !use_cache || !system.cache_enabled {
        return None;
    }
    let dir = home.join(".launchpadlib").join("cache");
    if dir.exists() { Some(dir) } else { None }
}

/// Where the credential file for `system` lives.
pub fn auth_file_path(home: &Path, system: &LpSystem) -> PathBuf {
    home.join(system.auth_file_name)
}

fn save_credentials(credentials: &Credentials, path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(credentials)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Get a `Launchpad` handle for the named environment, with caching on by
/// default. Unknown names are reported on stderr and yield `Ok(None)`;
/// every other failure is an error.
pub fn lp_factory(system_name: &str, app_name: &str) -> Result<Option<Launchpad>> {
    let Some(system) = env::lookup(system_name) else {
        eprintln!("System '{}' not supported.", system_name);
        eprintln!("Use one of: {}", env::supported_names().join(", "));
        return Ok(None);
    };
    let home = dirs::home_dir().ok_or(LpError::MissingHomeDirectory)?;
    let gateway = HttpGateway::new()?;
    connect(system, app_name, true, &home, &gateway).map(Some)
}

/// The full-parameter form of `lp_factory`: explicit home directory and
/// gateway, for callers that need either seam.
pub fn connect(
    system: &LpSystem,
    app_name: &str,
    use_cache: bool,
    home: &Path,
    gateway: &dyn AuthGateway,
) -> Result<Launchpad> {
    let cache = cache_dir(home, system, use_cache);
    let auth_file = auth_file_path(home, system);

    match fs::read_to_string(&auth_file) {
        Ok(data) => {
            eprintln!("Loading credentials...");
            let credentials: Credentials = serde_json::from_str(&data)
                .with_context(|| format!("Malformed credential file {}", auth_file.display()))?;
            if !gateway.check(&credentials, system.endpoint)? {
                return Err(LpError::InvalidCredentials { auth_file }.into());
            }
            Launchpad::new(credentials, system.endpoint, cache)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let credentials = gateway.acquire(app_name, system.endpoint)?;
            save_credentials(&credentials, &auth_file)?;
            eprintln!("Credentials saved");
            Launchpad::new(credentials, system.endpoint, cache)
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read {}", auth_file.display()))
        }
    }
}
