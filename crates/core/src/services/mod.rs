pub mod aggregation_service;
pub mod ledger_service;
pub mod net_worth_service;
pub mod price_service;
pub mod valuation_service;
