//! Project-fact store adapters

mod static_store;

pub use static_store::StaticProjectStore;
