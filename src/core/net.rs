// src/core/net.rs

// Blocking HTTP GET over reqwest (rustls). One client per transport.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::options::FetchOptions;
use crate::fetch::{FetchError, Transport};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(opts.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport { url: s!(), message: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport { url: s!(url), message: e.to_string() })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16(), url: s!(url) });
        }
        resp.text()
            .map_err(|e| FetchError::Transport { url: s!(url), message: e.to_string() })
    }
}
