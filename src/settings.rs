use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Identity provider settings handed to the client application at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Auth0Settings {
    /// Tenant domain prefix, e.g. `dev-zgnhr-f1.us`. A bare domain, never a url.
    pub url: String,
    /// Audience configured for the protected API.
    pub audience: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

/// Deployment record resolved once at startup and never mutated afterwards.
///
/// The serde names are the file format; external consumers address the
/// record by these exact keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub production: bool,
    #[serde(rename = "apiServerUrl")]
    pub api_server_url: String,
    pub auth0: Auth0Settings,
}

impl Settings {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading configuration file {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(raw).context("Invalid configuration document")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Presence and shape checks only. Fails with a message naming the field.
    pub fn validate(&self) -> Result<()> {
        absolute_url("apiServerUrl", &self.api_server_url)?;
        tenant_domain("auth0.url", &self.auth0.url)?;
        required("auth0.audience", &self.auth0.audience)?;
        required("auth0.clientId", &self.auth0.client_id)?;
        absolute_url("auth0.callbackURL", &self.auth0.callback_url)?;
        Ok(())
    }

    /// Join the API base url with a request path.
    pub fn api_endpoint(&self, path: &str) -> String {
        let base = self.api_server_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("Missing value for {}", field));
    }
    Ok(())
}

fn absolute_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .with_context(|| format!("{} is not an absolute url: `{}`", field, value))?;
    if url.host_str().is_none() {
        return Err(anyhow!("{} is missing a host: `{}`", field, value));
    }
    Ok(())
}

fn tenant_domain(field: &str, value: &str) -> Result<()> {
    required(field, value)?;
    if value.contains('/') {
        return Err(anyhow!("{} must be a bare domain, not a url: `{}`", field, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> String {
        r#"{
            "production": false,
            "apiServerUrl": "http://localhost:5000",
            "auth0": {
                "url": "dev-zgnhr-f1.us",
                "audience": "coffee",
                "clientId": "LzodZ85BavemAW4REPyLie6VWRzyCUP9",
                "callbackURL": "http://localhost:8100"
            }
        }"#
        .to_string()
    }

    #[test]
    fn it_reads_the_documented_key_names() {
        // Act
        let settings = Settings::from_json_str(&document()).expect("Document should deserialize");

        // Assert
        assert!(!settings.production, "Should be a development record");
        assert_eq!(settings.api_server_url, "http://localhost:5000");
        assert_eq!(settings.auth0.url, "dev-zgnhr-f1.us");
        assert_eq!(settings.auth0.audience, "coffee");
        assert_eq!(settings.auth0.client_id, "LzodZ85BavemAW4REPyLie6VWRzyCUP9");
        assert_eq!(settings.auth0.callback_url, "http://localhost:8100");
    }

    #[test]
    fn it_serializes_back_to_the_same_key_names() {
        // Arrange
        let settings = Settings::from_json_str(&document()).expect("Document should deserialize");

        // Act
        let raw = serde_json::to_string(&settings).expect("Record should serialize");

        // Assert
        assert!(raw.contains("\"apiServerUrl\""), "apiServerUrl key missing in {}", raw);
        assert!(raw.contains("\"clientId\""), "clientId key missing in {}", raw);
        assert!(raw.contains("\"callbackURL\""), "callbackURL key missing in {}", raw);
    }

    #[test]
    fn it_names_a_missing_client_id() {
        // Arrange
        let raw = document().replace("\"clientId\": \"LzodZ85BavemAW4REPyLie6VWRzyCUP9\",", "");

        // Act
        let result = Settings::from_json_str(&raw);

        // Assert
        let message = format!("{:#}", result.expect_err("Document should be rejected"));
        assert!(message.contains("clientId"), "Error should name the field, but {}", message);
    }

    #[test]
    fn it_rejects_unknown_keys() {
        // Arrange
        let raw = document().replace("\"production\": false,", "\"production\": false, \"theme\": \"dark\",");

        // Act
        let result = Settings::from_json_str(&raw);

        // Assert
        let message = format!("{:#}", result.expect_err("Document should be rejected"));
        assert!(message.contains("theme"), "Error should name the key, but {}", message);
    }

    #[test]
    fn it_rejects_a_relative_api_server_url() {
        // Arrange
        let raw = document().replace("http://localhost:5000", "localhost:5000");

        // Act
        let result = Settings::from_json_str(&raw);

        // Assert
        let message = format!("{:#}", result.expect_err("Document should be rejected"));
        assert!(
            message.contains("apiServerUrl"),
            "Error should name the field, but {}",
            message
        );
    }

    #[test]
    fn it_rejects_a_tenant_value_that_is_a_url() {
        // Arrange
        let raw = document().replace("dev-zgnhr-f1.us", "https://dev-zgnhr-f1.us");

        // Act
        let result = Settings::from_json_str(&raw);

        // Assert
        let message = format!("{:#}", result.expect_err("Document should be rejected"));
        assert!(
            message.contains("auth0.url"),
            "Error should name the field, but {}",
            message
        );
    }

    #[test]
    fn it_joins_api_paths() {
        // Arrange
        let settings = Settings::from_json_str(&document()).expect("Document should deserialize");

        // Act / Assert
        assert_eq!(settings.api_endpoint("/coffees"), "http://localhost:5000/coffees");
        assert_eq!(settings.api_endpoint("coffees"), "http://localhost:5000/coffees");
    }

    #[test]
    fn it_joins_api_paths_against_a_trailing_slash_base() {
        // Arrange
        let raw = document().replace("http://localhost:5000", "http://localhost:5000/");
        let settings = Settings::from_json_str(&raw).expect("Document should deserialize");

        // Act / Assert
        assert_eq!(settings.api_endpoint("/coffees"), "http://localhost:5000/coffees");
    }
}
