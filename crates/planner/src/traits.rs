use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::models::{PreviewRequest, RebalancePreview};

#[cfg(test)]
use mockall::automock;

use crate::error::PlannerError;

/// A decoded wire payload that still has to be checked before use.
pub trait RemoteResponse<T> {
    fn validate(self, received_at: DateTime<Utc>) -> Result<T, PlannerError>;

    fn validate_now(self) -> Result<T, PlannerError>
    where
        Self: Sized,
    {
        self.validate(Utc::now())
    }
}

/// The remote planning service. Passed explicitly to whoever needs a preview.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlannerApi: Send + Sync {
    async fn preview(&self, request: &PreviewRequest) -> Result<RebalancePreview, PlannerError>;
}
