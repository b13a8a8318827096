pub mod driver;
pub mod host;
pub mod query_bridge;

pub use host::{HostBridge, query_float, query_integer, query_string};
pub use query_bridge::QueryBridge;

#[cfg(test)]
mod host_tests;
