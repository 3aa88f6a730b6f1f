pub mod analytics;
pub mod config;
pub mod experiments;
pub mod logging;
pub mod tournament;
