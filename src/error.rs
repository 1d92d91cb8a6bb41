use thiserror::Error;

use crate::program::ShaderStage;

/// Failure taxonomy for shader construction.
///
/// Compile and link failures carry the driver's info log verbatim so the
/// caller can decide whether a broken shader is fatal.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader compilation failed ({stage}): {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program linking failed (PROGRAM): {log}")]
    Link { log: String },

    #[error("driver could not allocate a shader object: {0}")]
    Driver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shader manifest error: {0}")]
    Config(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_carries_stage_tag_and_driver_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:3(1): error: syntax error".into(),
        };
        let message = err.to_string();
        assert!(message.contains("VERTEX"));
        assert!(message.contains("syntax error"));
    }

    #[test]
    fn link_error_is_tagged_as_program_failure() {
        let err = ShaderError::Link {
            log: "unresolved input `Normal`".into(),
        };
        let message = err.to_string();
        assert!(message.contains("PROGRAM"));
        assert!(message.contains("unresolved input"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ShaderError::from(io);
        assert!(matches!(err, ShaderError::Io(_)));
    }
}
