pub mod engine;
pub mod palette;
pub mod quote;
pub mod report;
pub mod services;

pub use engine::{
    AllocationChange, ChangeType, ChartSlice, derive_changes, normalize, stability_score,
};
pub use quote::{Chain, SwapQuote};
pub use report::RebalanceReport;
