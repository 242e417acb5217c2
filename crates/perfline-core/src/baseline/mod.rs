//! Baseline persistence and lookup

pub mod store;

pub use store::BaselineStore;
