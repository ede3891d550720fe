pub mod analytics;
pub mod holding;
pub mod ledger;
pub mod net_worth;
pub mod period;
pub mod settings;
pub mod transaction;
