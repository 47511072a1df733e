use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{AgenticError, AgenticResult};
use crate::models::{SimulationRequest, SimulationResponse};

pub const SIMULATE_PATH: &str = "/simulate";

/// Anything that can turn a prompt into a transcript.
#[async_trait]
pub trait SimulationService: Send + Sync {
    fn endpoint(&self) -> String;

    async fn simulate(&self, request: &SimulationRequest) -> AgenticResult<SimulationResponse>;
}

pub struct HttpSimulationClient {
    client: Client,
    base_url: String,
}

impl HttpSimulationClient {
    pub fn new(config: &ServiceConfig) -> AgenticResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| AgenticError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> AgenticResult<Self> {
        let config = ServiceConfig {
            base_url: base_url.into(),
            ..ServiceConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SimulationService for HttpSimulationClient {
    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SIMULATE_PATH)
    }

    async fn simulate(&self, request: &SimulationRequest) -> AgenticResult<SimulationResponse> {
        let url = self.endpoint();
        debug!(%url, max_rounds = request.max_rounds, "Posting simulation request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Simulation request to {} failed: {}", url, e);
                AgenticError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Simulation service returned status: {}", status);
            return Err(AgenticError::HttpStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(AgenticError::from)?;
        serde_json::from_slice::<SimulationResponse>(&bytes).map_err(|e| {
            warn!("Failed to parse simulation response: {}", e);
            AgenticError::ResponseParseError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_path() {
        let client = HttpSimulationClient::with_base_url("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/simulate");
    }
}
