//! Almacén de gauges para Sonda.
//!
//! Mantiene el último valor observado por métrica y lo codifica en el
//! formato de texto de Prometheus. El registro se construye explícitamente
//! y se comparte por referencia; no hay estado global.

use crate::error::{Result, SondaError};
use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};

/// Tipo de métrica medida.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    Latency,
    Bandwidth,
}

impl MetricKind {
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Latency => "network_latency_ms",
            MetricKind::Bandwidth => "network_bandwidth_kbps",
        }
    }
}

/// Registro explícito con los dos gauges de red.
///
/// Cada loop de recolección escribe únicamente su propio gauge; el endpoint
/// de métricas lee en cualquier momento. Los gauges de prometheus son celdas
/// atómicas, así que una lectura nunca observa un valor parcial.
pub struct GaugeStore {
    registry: Registry,
    latency: Gauge,
    bandwidth: Gauge,
}

impl GaugeStore {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let latency = Gauge::with_opts(Opts::new(
            MetricKind::Latency.name(),
            "Measured network latency in milliseconds (ms)",
        ))?;
        let bandwidth = Gauge::with_opts(Opts::new(
            MetricKind::Bandwidth.name(),
            "Measured network bandwidth in Kilobits per second (kbps)",
        ))?;

        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(bandwidth.clone()))?;

        Ok(GaugeStore {
            registry,
            latency,
            bandwidth,
        })
    }

    fn gauge(&self, kind: MetricKind) -> &Gauge {
        match kind {
            MetricKind::Latency => &self.latency,
            MetricKind::Bandwidth => &self.bandwidth,
        }
    }

    /// Reemplaza el valor almacenado para `kind`; nunca falla.
    pub fn set(&self, kind: MetricKind, value: f64) {
        self.gauge(kind).set(value);
    }

    /// Último valor establecido para `kind`, o 0.0 antes del primer `set`.
    pub fn get(&self, kind: MetricKind) -> f64 {
        self.gauge(kind).get()
    }

    /// Codifica todas las métricas registradas (HELP/TYPE más una línea de
    /// valor por gauge) en el formato de exposición de Prometheus.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| SondaError::Metrics(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_returns_last_set_value() {
        let store = GaugeStore::new().unwrap();
        assert_eq!(store.get(MetricKind::Latency), 0.0);

        store.set(MetricKind::Latency, 12.3);
        assert_eq!(store.get(MetricKind::Latency), 12.3);

        store.set(MetricKind::Latency, 7.5);
        assert_eq!(store.get(MetricKind::Latency), 7.5);

        // El otro gauge no se ve afectado
        assert_eq!(store.get(MetricKind::Bandwidth), 0.0);
    }

    #[test]
    fn test_concurrent_reads_never_observe_torn_values() {
        let store = Arc::new(GaugeStore::new().unwrap());

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10_000u32 {
                    store.set(MetricKind::Bandwidth, f64::from(i));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        let v = store.get(MetricKind::Bandwidth);
                        // Todos los valores escritos son enteros no negativos;
                        // cualquier otra cosa sería una lectura parcial
                        assert!(v >= 0.0 && v < 10_000.0);
                        assert_eq!(v, v.trunc());
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_encode_contains_both_gauges() {
        let store = GaugeStore::new().unwrap();
        store.set(MetricKind::Latency, 12.3);
        store.set(MetricKind::Bandwidth, 10500.0);

        let text = store.encode().unwrap();
        assert!(text.contains("# HELP network_latency_ms"));
        assert!(text.contains("# TYPE network_latency_ms gauge"));
        assert!(text.contains("network_latency_ms 12.3"));
        assert!(text.contains("# HELP network_bandwidth_kbps"));
        assert!(text.contains("# TYPE network_bandwidth_kbps gauge"));
        assert!(text.contains("network_bandwidth_kbps 10500"));
    }
}
