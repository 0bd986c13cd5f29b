pub mod client;
pub mod endpoint;
pub mod types;

pub use client::JikanClient;
pub use endpoint::Endpoint;
