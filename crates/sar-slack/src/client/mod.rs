//! Slack Web API client.
//!
//! Provides a sync HTTP client for the Slack Web API with bearer token
//! authentication.

mod files;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use sar_config::SlackSettings;

use crate::error::SlackError;
use crate::types::Envelope;

/// Slack Web API client.
pub struct SlackClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl SlackClient {
    /// Create client from settings and an API token.
    #[must_use]
    pub fn from_config(settings: &SlackSettings, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(settings.timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.api_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        }
    }

    /// Create client against the public Slack API.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::from_config(&SlackSettings::default(), token)
    }

    /// Get the URL of an API method.
    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Call a read-only API method and unwrap its envelope.
    fn get<T: DeserializeOwned>(
        &self,
        method: &'static str,
        query: &[(&str, String)],
    ) -> Result<T, SlackError> {
        let url = self.method_url(method);
        debug!("GET {} {:?}", url, query);

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(*key, value.as_str());
        }

        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(SlackError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let envelope: Envelope<T> = body_reader.read_json()?;
        if !envelope.ok {
            return Err(SlackError::Api {
                method,
                code: envelope.error.unwrap_or_else(|| "unknown_error".to_owned()),
            });
        }

        Ok(envelope.body)
    }
}
