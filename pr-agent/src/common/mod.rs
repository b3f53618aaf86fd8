//! Common utilities shared across the library

pub mod env_loader;

pub use env_loader::EnvLoader;
