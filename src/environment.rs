use anyhow::{anyhow, Result};

/// Named deployment variants. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Compiled-in values a variant carries. `None` means the environment must
/// supply the value, or startup fails.
pub(crate) struct VariantDefaults {
    pub(crate) api_server_url: Option<&'static str>,
    pub(crate) auth0_url: Option<&'static str>,
    pub(crate) auth0_audience: Option<&'static str>,
    pub(crate) auth0_client_id: Option<&'static str>,
    pub(crate) auth0_callback_url: Option<&'static str>,
}

const NO_DEFAULTS: VariantDefaults = VariantDefaults {
    api_server_url: None,
    auth0_url: None,
    auth0_audience: None,
    auth0_client_id: None,
    auth0_callback_url: None,
};

impl Environment {
    /// Unknown names are fatal; an unset value selects `development`.
    pub fn from_env_string(value: Option<String>) -> Result<Self> {
        match value.as_deref().map(|s| s.to_lowercase()).as_deref() {
            Some("development") | None => Ok(Environment::Development),
            Some("staging") => Ok(Environment::Staging),
            Some("production") => Ok(Environment::Production),
            Some(other) => Err(anyhow!("Unknown environment name `{}`", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub(crate) fn production_default(&self) -> bool {
        !matches!(self, Environment::Development)
    }

    pub(crate) fn defaults(&self) -> VariantDefaults {
        match self {
            // Local template values; staging and production records carry no
            // compiled-in identity settings.
            Environment::Development => VariantDefaults {
                api_server_url: Some("http://localhost:5000"),
                auth0_url: Some("dev-zgnhr-f1.us"),
                auth0_audience: Some("coffee"),
                auth0_client_id: Some("LzodZ85BavemAW4REPyLie6VWRzyCUP9"),
                auth0_callback_url: Some("http://localhost:8100"),
            },
            Environment::Staging | Environment::Production => NO_DEFAULTS,
        }
    }
}
