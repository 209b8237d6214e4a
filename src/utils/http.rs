// src/utils/http.rs
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Proxy, header};
use tracing::debug;
use url::Url;

use crate::config::{HttpMethod, Settings};
use crate::error::{AutomaterError, AutomaterResult};
use crate::osint::{SiteFetcher, SourceRequest};

/// HTTP client for passive source lookups
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client from the user agent, proxy and timeout settings
    pub fn new(settings: &Settings) -> AutomaterResult<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(&settings.user_agent);

        if let Some(proxy) = &settings.proxy {
            let proxy_url = proxy_url(proxy)?;
            debug!("Using proxy {}", proxy_url);
            builder = builder.proxy(Proxy::all(proxy_url.as_str())?);
        }

        let client = builder.build()?;
        debug!("HTTP client ready, user agent {}", settings.user_agent);

        Ok(Self { client })
    }

    /// GET a URL and return the body, failing on non-success statuses
    pub async fn get_text(&self, url: &str) -> AutomaterResult<String> {
        debug!("GET {}", url);

        let response = self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

/// Proxies given as `host:port` are taken to be HTTP proxies
fn proxy_url(proxy: &str) -> AutomaterResult<Url> {
    let candidate = if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| AutomaterError::InvalidInput(format!("Invalid proxy {}: {}", proxy, e)))?;

    if url.host_str().is_none() {
        return Err(AutomaterError::InvalidInput(format!("Proxy {} has no host", proxy)));
    }

    Ok(url)
}

#[async_trait]
impl SiteFetcher for HttpClient {
    async fn fetch(&self, request: &SourceRequest) -> AutomaterResult<String> {
        let mut builder = match request.method {
            HttpMethod::Get => {
                debug!("GET {}", request.url);
                self.client.get(&request.url)
            }
            HttpMethod::Post => {
                debug!("POST {}", request.url);
                self.client
                    .post(&request.url)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(request.body.clone().unwrap_or_default())
            }
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AutomaterError::Network(format!(
                "{} returned HTTP {}",
                request.url, status
            )));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_url_adds_scheme() {
        let url = proxy_url("proxy.example.com:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("proxy.example.com"));
        assert_eq!(url.port(), Some(8080));

        assert_eq!(proxy_url("socks5://127.0.0.1:9050").unwrap().scheme(), "socks5");
    }

    #[test]
    fn test_proxy_url_rejects_garbage() {
        assert!(matches!(proxy_url("http://"), Err(AutomaterError::InvalidInput(_))));
    }

    #[test]
    fn test_client_builds_with_proxy() {
        let mut settings = Settings::default();
        settings.proxy = Some("proxy.example.com:8080".to_string());

        assert!(HttpClient::new(&settings).is_ok());

        settings.proxy = Some("http://".to_string());
        assert!(matches!(
            HttpClient::new(&settings),
            Err(AutomaterError::InvalidInput(_))
        ));
    }
}
