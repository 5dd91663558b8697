pub mod manager;
pub mod preferences;
