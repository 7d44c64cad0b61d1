//! Muestreo de calidad de red para Sonda.
//!
//! Adaptadores finos sobre la salida de texto libre de `ping` e `iperf`.
//! El contrato es posicional/textual porque las herramientas no ofrecen
//! salida estructurada; cualquier fallo de parseo se clasifica y se devuelve
//! como error recuperable, nunca como pánico.

use crate::error::{Result, SondaError};
use crate::gauges::MetricKind;
use tokio::process::Command;

/// Una lectura puntual: valor numérico junto con su tipo de métrica.
#[derive(Clone, Copy, Debug)]
pub struct Measurement {
    pub kind: MetricKind,
    pub value: f64,
}

/// Mide la latencia de ida y vuelta en milisegundos con un solo eco ICMP.
pub async fn measure_latency(target: &str) -> Result<Measurement> {
    let output = run_tool("ping", &["-c", "1", target]).await?;
    let value = parse_latency_output(&output)?;
    Ok(Measurement {
        kind: MetricKind::Latency,
        value,
    })
}

/// Mide el ancho de banda alcanzable en kbit/s con un test corto de iperf.
pub async fn measure_bandwidth(target: &str, test_secs: u64) -> Result<Measurement> {
    let secs = test_secs.to_string();
    let output = run_tool("iperf", &["-c", target, "-t", &secs]).await?;
    let value = parse_bandwidth_output(&output)?;
    Ok(Measurement {
        kind: MetricKind::Bandwidth,
        value,
    })
}

/// Ejecuta la herramienta y devuelve stdout y stderr concatenados.
///
/// Un fallo de arranque o una salida con estado distinto de cero invalidan
/// la captura completa.
async fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| SondaError::ToolInvocation(format!("{}: {}", program, e)))?;

    // Las herramientas reparten su resumen entre stdout y stderr
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(SondaError::ToolInvocation(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            text.trim()
        )));
    }

    Ok(text)
}

/// Extrae la latencia en milisegundos de la salida de `ping`.
///
/// Busca el token literal `time=`, toma el tramo hasta el siguiente espacio
/// en blanco y parsea solo la corrida numérica inicial, de modo que
/// `time=12.3 ms` y `time=12.3ms` producen el mismo valor.
pub fn parse_latency_output(output: &str) -> Result<f64> {
    let rest = output
        .split_once("time=")
        .map(|(_, rest)| rest)
        .ok_or_else(|| SondaError::Parse("no time= marker in ping output".to_string()))?;

    let token = rest.split(char::is_whitespace).next().unwrap_or("");
    let end = token
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(token.len());

    token[..end]
        .parse()
        .map_err(|_| SondaError::Parse(format!("invalid latency value '{}'", token)))
}

/// Extrae el ancho de banda en kbit/s de la línea resumen de `iperf`.
///
/// La línea 7 (índice 6) debe existir y su campo 7 (índice 6) debe ser el
/// valor numérico del resumen.
pub fn parse_bandwidth_output(output: &str) -> Result<f64> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() < 7 {
        return Err(SondaError::InvalidOutput(format!(
            "expected at least 7 lines of iperf output, got {}",
            lines.len()
        )));
    }

    let fields: Vec<&str> = lines[6].split_whitespace().collect();
    if fields.len() < 7 {
        return Err(SondaError::InvalidOutput(format!(
            "expected at least 7 fields in iperf summary line, got {}",
            fields.len()
        )));
    }

    fields[6]
        .parse()
        .map_err(|_| SondaError::Parse(format!("invalid bandwidth value '{}'", fields[6])))
}
