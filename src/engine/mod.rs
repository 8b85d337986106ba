pub mod factory;

pub use factory::BackendFactory;
