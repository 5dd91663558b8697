pub mod currency_service;
pub mod metrics;
pub mod report_service;
pub mod transaction_service;
