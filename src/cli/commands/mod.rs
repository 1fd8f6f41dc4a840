//! CLI command implementations

pub mod cache;
pub mod config;
pub mod fetch;
pub mod locate;

pub use cache::execute as cache;
pub use config::execute as config;
pub use fetch::execute as fetch;
pub use locate::execute as locate;
