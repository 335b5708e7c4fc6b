pub mod article;
pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod gateway;
pub mod notify;
pub mod profile;
pub mod session;
pub mod workflow;

pub use config::PlumeConfig;
pub use error::{PlumeError, Result};
pub use gateway::ServiceGateway;
