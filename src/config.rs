//! Configuración del proceso desde variables de entorno.
//!
//! El objetivo de medición es obligatorio; el resto tiene valores por defecto.

use crate::error::{Result, SondaError};
use std::env;

/// Configuración inmutable establecida una sola vez al inicio del proceso.
#[derive(Clone, Debug)]
pub struct Config {
    /// Host o IP contra el que se mide (compartido de solo lectura por los loops)
    pub target: String,
    pub listen_addr: String,
    /// Segundos de reposo entre ciclos de muestreo
    pub sample_interval_secs: u64,
    /// Duración en segundos del test de iperf (flag -t)
    pub bandwidth_test_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let target = env::var("TARGET_IP").map_err(|_| {
            SondaError::Config("TARGET_IP environment variable is not set".to_string())
        })?;
        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8330".to_string());
        let sample_interval_secs = parse_env_u64("SAMPLE_INTERVAL_SECS", 5)?;
        let bandwidth_test_secs = parse_env_u64("BANDWIDTH_TEST_SECS", 1)?;

        Ok(Config {
            target,
            listen_addr,
            sample_interval_secs,
            bandwidth_test_secs,
        })
    }
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            SondaError::Config(format!(
                "{} must be a positive integer, got '{}'",
                name, raw
            ))
        }),
        Err(_) => Ok(default),
    }
}
