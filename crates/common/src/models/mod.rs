pub mod allocation;
pub mod preview;
pub mod swap_plan;

pub use allocation::AllocationVector;
pub use preview::{PreviewRequest, RebalancePreview};
pub use swap_plan::{BaseFunding, Intent, SwapAction, SwapPlan};
