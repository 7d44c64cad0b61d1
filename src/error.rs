//! Tipos de error personalizados para Sonda.
//!
//! Proporciona errores estructurados con contexto para mejor debugging
//! y manejo de errores en producción.

use std::fmt;

/// Error principal de la aplicación Sonda
#[derive(Debug)]
pub enum SondaError {
    /// Errores de configuración
    Config(String),
    /// La herramienta de diagnóstico no pudo ejecutarse o terminó mal
    ToolInvocation(String),
    /// La salida capturada no tiene la estructura mínima esperada
    InvalidOutput(String),
    /// Errores de parsing numérico
    Parse(String),
    /// Errores de I/O
    Io(std::io::Error),
    /// Errores del registro de métricas
    Metrics(String),
}

impl fmt::Display for SondaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SondaError::Config(msg) => write!(f, "Config error: {}", msg),
            SondaError::ToolInvocation(msg) => write!(f, "Tool invocation error: {}", msg),
            SondaError::InvalidOutput(msg) => write!(f, "Invalid output: {}", msg),
            SondaError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SondaError::Io(err) => write!(f, "IO error: {}", err),
            SondaError::Metrics(msg) => write!(f, "Metrics error: {}", msg),
        }
    }
}

impl std::error::Error for SondaError {}

impl From<std::io::Error> for SondaError {
    fn from(err: std::io::Error) -> Self {
        SondaError::Io(err)
    }
}

impl From<prometheus::Error> for SondaError {
    fn from(err: prometheus::Error) -> Self {
        SondaError::Metrics(err.to_string())
    }
}

/// Result type alias para simplificar el código
pub type Result<T> = std::result::Result<T, SondaError>;
