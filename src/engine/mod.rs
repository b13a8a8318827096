pub mod bridge;
pub mod coerce;
pub mod errors;
pub mod fetch;
pub mod process;
pub mod types;

pub use errors::*;
