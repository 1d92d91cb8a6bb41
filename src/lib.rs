//! Compile-and-link plumbing for OpenGL vertex/fragment shader pairs.
//!
//! [`ShaderProgram`] submits a [`ShaderSource`] pair to the driver, links it,
//! and exposes typed uniform setters. The GL context is an explicit
//! parameter on every operation; there is no ambient global.

pub mod config;
pub mod error;
pub mod program;
pub mod source;

// Re-export commonly used types
pub use config::ShaderConfig;
pub use error::ShaderError;
pub use program::{ShaderProgram, ShaderStage};
pub use source::ShaderSource;
