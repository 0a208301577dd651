use std::time::Duration;

use async_trait::async_trait;
use common::models::{PreviewRequest, RebalancePreview};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};
use url::Url;

use crate::error::PlannerError;
use crate::remote::{ErrorBody, RebalanceResponse};
use crate::traits::{PlannerApi, RemoteResponse};

const PREVIEW_PATH: &str = "rebalance/preview";

/// HTTP session with the planning service. One attempt per call; retrying is the caller's job.
#[derive(Clone)]
pub struct PlannerClient {
    client: Client,
    preview_url: Url,
}

impl PlannerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .user_agent("stable_rebalancer/0.1.0")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            preview_url: preview_url(base_url)?,
        })
    }

    pub fn preview_url(&self) -> &Url {
        &self.preview_url
    }

    fn interpret(status: StatusCode, body: &str) -> Result<RebalancePreview, PlannerError> {
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .filter(|e| !e.trim().is_empty());

            return Err(match message {
                Some(message) => PlannerError::Server(message),
                None => PlannerError::Status(status.as_u16()),
            });
        }

        let response = serde_json::from_str::<RebalanceResponse>(body)
            .map_err(|e| PlannerError::Decode(e.to_string()))?;
        response.validate_now()
    }
}

#[async_trait]
impl PlannerApi for PlannerClient {
    async fn preview(&self, request: &PreviewRequest) -> Result<RebalancePreview, PlannerError> {
        info!("Requesting rebalance preview from {}", self.preview_url);
        debug!("Preview request: {:?}", request);

        let resp = self
            .client
            .post(self.preview_url.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            error!("Planner preview failed ({}): {}", status, body);
        }

        Self::interpret(status, &body)
    }
}

fn preview_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREVIEW_PATH)
}
