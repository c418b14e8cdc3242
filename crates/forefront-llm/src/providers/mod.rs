//! Concrete backend providers

pub mod openrouter;
