pub mod portfolio_service;
pub mod price_service;
pub mod report_service;
