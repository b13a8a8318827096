pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{
    DriverConfig, LoggingConfig, ProcessorConfig, Settings, StoreConfig, load_settings,
    load_settings_from,
};
