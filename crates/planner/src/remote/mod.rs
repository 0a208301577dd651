pub mod planner_client;
pub mod preview_response;

pub use planner_client::PlannerClient;
pub use preview_response::{ErrorBody, RebalanceResponse};
