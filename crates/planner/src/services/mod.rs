pub use preview_service::PreviewService;

pub mod preview_service;
