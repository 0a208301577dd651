pub mod error;
pub mod remote;
pub mod services;
pub mod traits;

pub use error::{PlannerError, ValidationError};
pub use remote::PlannerClient;
pub use traits::PlannerApi;
