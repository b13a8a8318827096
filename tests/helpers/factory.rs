pub use super::factories::{DocumentFactory, ProcessorFactory, StoreFactory, TargetFactory};

pub struct Factory;

impl Factory {
    pub fn target() -> TargetFactory {
        TargetFactory::new()
    }

    pub fn processor() -> ProcessorFactory {
        ProcessorFactory::new()
    }

    pub fn document() -> DocumentFactory {
        DocumentFactory::new()
    }

    pub fn store() -> StoreFactory {
        StoreFactory::new()
    }
}
