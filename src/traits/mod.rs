pub mod backend;

pub use backend::Backend;
