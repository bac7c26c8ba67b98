//! Registry existence probes.

use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;

use crate::error::Result;

/// Public npm registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// What the registry said about one type package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The registry answered 200.
    Found,

    /// The registry answered with another status, normally 404.
    NotPublished { status: u16 },

    /// The request never produced a response.
    Failed { reason: String },

    /// The probe exceeded its deadline.
    TimedOut,
}

/// HTTP client for type package existence checks.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("typie/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    /// Registry base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a package's registry document.
    pub fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }

    /// Check whether the registry publishes `package`.
    ///
    /// Never errors: every failure mode maps to a [`ProbeResult`].
    pub async fn probe(&self, package: &str) -> ProbeResult {
        let url = self.package_url(package);
        tracing::debug!("Probing {}", url);

        let result = match tokio::time::timeout(self.timeout, self.client.get(&url).send()).await {
            Err(_) => ProbeResult::TimedOut,
            Ok(Err(e)) => ProbeResult::Failed {
                reason: e.to_string(),
            },
            Ok(Ok(response)) if response.status() == StatusCode::OK => ProbeResult::Found,
            Ok(Ok(response)) => ProbeResult::NotPublished {
                status: response.status().as_u16(),
            },
        };

        tracing::debug!("Probe {} -> {:?}", url, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn probe_blocking(client: &RegistryClient, package: &str) -> ProbeResult {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(client.probe(package))
    }

    #[test]
    fn package_url_trims_trailing_slash() {
        let client = RegistryClient::new("https://registry.example.com/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            client.package_url("@types/left-pad"),
            "https://registry.example.com/@types/left-pad"
        );
    }

    #[test]
    fn probe_found_on_200() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/@types/left-pad");
            then.status(200).body("{}");
        });

        let client = RegistryClient::new(&server.base_url(), Duration::from_secs(10)).unwrap();

        assert_eq!(probe_blocking(&client, "@types/left-pad"), ProbeResult::Found);
        mock.assert_calls(1);
    }

    #[test]
    fn probe_not_published_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/@types/no-such-thing");
            then.status(404);
        });

        let client = RegistryClient::new(&server.base_url(), Duration::from_secs(10)).unwrap();

        assert_eq!(
            probe_blocking(&client, "@types/no-such-thing"),
            ProbeResult::NotPublished { status: 404 }
        );
    }

    #[test]
    fn probe_other_success_status_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/@types/moved");
            then.status(204);
        });

        let client = RegistryClient::new(&server.base_url(), Duration::from_secs(10)).unwrap();

        assert_eq!(
            probe_blocking(&client, "@types/moved"),
            ProbeResult::NotPublished { status: 204 }
        );
    }

    #[test]
    fn probe_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/@types/slow");
            then.status(200).delay(Duration::from_secs(5));
        });

        let client = RegistryClient::new(&server.base_url(), Duration::from_millis(100)).unwrap();

        assert_eq!(probe_blocking(&client, "@types/slow"), ProbeResult::TimedOut);
    }

    #[test]
    fn probe_connection_refused_is_failure() {
        // Port 9 (discard) is almost never listening locally.
        let client = RegistryClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();

        assert!(matches!(
            probe_blocking(&client, "@types/left-pad"),
            ProbeResult::Failed { .. } | ProbeResult::TimedOut
        ));
    }
}
