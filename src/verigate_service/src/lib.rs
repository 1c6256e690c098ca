pub mod account_service;
pub mod telemetry;

pub use account_service::AccountService;
pub use telemetry::init_tracing;
