pub mod engine;
pub mod handle;

pub use engine::QueryProcessEngine;
pub use handle::ProcessHandle;
