use anyhow::{Context, Result};
use tracing::debug;

pub use environment::Environment;
pub use settings::{Auth0Settings, Settings};

mod environment;
mod settings;

pub(crate) static ENV_KEY_ENVIRONMENT: &str = "BREWENV_ENVIRONMENT";
pub(crate) static ENV_KEY_CONFIG_FILE: &str = "BREWENV_CONFIG_FILE";
pub(crate) static ENV_KEY_PRODUCTION: &str = "BREWENV_PRODUCTION";
pub(crate) static ENV_KEY_API_SERVER_URL: &str = "BREWENV_API_SERVER_URL";
pub(crate) static ENV_KEY_AUTH0_URL: &str = "BREWENV_AUTH0_URL";
pub(crate) static ENV_KEY_AUTH0_AUDIENCE: &str = "BREWENV_AUTH0_AUDIENCE";
pub(crate) static ENV_KEY_AUTH0_CLIENT_ID: &str = "BREWENV_AUTH0_CLIENT_ID";
pub(crate) static ENV_KEY_AUTH0_CALLBACK_URL: &str = "BREWENV_AUTH0_CALLBACK_URL";

fn resolve(key: &str, default: Option<&str>) -> Result<String> {
    match dotenvy::var(key) {
        Ok(value) => Ok(value),
        Err(_) => default
            .map(str::to_string)
            .with_context(|| format!("missing {}", key)),
    }
}

fn resolve_production(environment: Environment) -> Result<bool> {
    match dotenvy::var(ENV_KEY_PRODUCTION) {
        Ok(value) => value
            .parse::<bool>()
            .with_context(|| format!("{} must be `true` or `false`", ENV_KEY_PRODUCTION)),
        Err(_) => Ok(environment.production_default()),
    }
}

/// Resolve the active deployment record.
///
/// Selection happens once, before any consumer runs: the variant comes from
/// `BREWENV_ENVIRONMENT`, a `BREWENV_CONFIG_FILE` document replaces the
/// variant defaults entirely, and otherwise each field reads its
/// `BREWENV_*` variable with the variant default as fallback. Missing or
/// malformed values abort startup.
pub fn load_settings() -> Result<Settings> {
    let environment = Environment::from_env_string(dotenvy::var(ENV_KEY_ENVIRONMENT).ok())?;
    debug!("🌍 Active environment: {}", environment.name());

    if let Ok(path) = dotenvy::var(ENV_KEY_CONFIG_FILE) {
        debug!("📃 Reading configuration from {}", path);
        return Settings::from_json_file(&path);
    }

    let defaults = environment.defaults();
    let settings = Settings {
        production: resolve_production(environment)?,
        api_server_url: resolve(ENV_KEY_API_SERVER_URL, defaults.api_server_url)?,
        auth0: Auth0Settings {
            url: resolve(ENV_KEY_AUTH0_URL, defaults.auth0_url)?,
            audience: resolve(ENV_KEY_AUTH0_AUDIENCE, defaults.auth0_audience)?,
            client_id: resolve(ENV_KEY_AUTH0_CLIENT_ID, defaults.auth0_client_id)?,
            callback_url: resolve(ENV_KEY_AUTH0_CALLBACK_URL, defaults.auth0_callback_url)?,
        },
    };
    settings.validate()?;
    Ok(settings)
}
