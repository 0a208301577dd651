pub use rebalance_service::RebalanceService;

pub mod rebalance_service;
