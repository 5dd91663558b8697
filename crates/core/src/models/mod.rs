pub mod book;
pub mod budget;
pub mod currency;
pub mod debt;
pub mod ledger;
pub mod money;
pub mod report;
pub mod savings_goal;
pub mod settings;
pub mod subscription;
pub mod summary;
pub mod transaction;
