pub mod document_factory;
pub mod processor_factory;
pub mod store_factory;
pub mod target_factory;

pub use document_factory::DocumentFactory;
pub use processor_factory::ProcessorFactory;
pub use store_factory::StoreFactory;
pub use target_factory::TargetFactory;

#[cfg(test)]
mod document_factory_test;
#[cfg(test)]
mod processor_factory_test;
#[cfg(test)]
mod store_factory_test;
#[cfg(test)]
mod target_factory_test;
