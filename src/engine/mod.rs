//! Failure translation engine.

pub mod translator;

pub use translator::ErrorTranslator;
