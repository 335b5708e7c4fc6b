pub mod http;
pub mod protocol;

pub use http::HttpGateway;
