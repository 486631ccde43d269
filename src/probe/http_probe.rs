use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::probe::{Prober, Reachability};

pub struct HttpProber {
    client: Client,
    accept: HeaderValue,
}

impl HttpProber {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let accept = HeaderValue::from_str(&config.accept)
            .unwrap_or_else(|_| HeaderValue::from_static("text/html,*/*;q=0.8"));

        Ok(Self { client, accept })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Reachability {
        let parsed = match url::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(url, error = %e, "unparseable URL, treating as unreachable");
                return Reachability::offline(0);
            }
        };

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, self.accept.clone())
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(url, status, "probe response");
                Reachability::from_status(status)
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "probe transport failure");
                Reachability::offline(0)
            }
        }
    }
}
