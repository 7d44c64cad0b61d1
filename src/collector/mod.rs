//! Loops de recolección de Sonda.
//!
//! Un loop por métrica: muestrea, actualiza el gauge y duerme. Un fallo se
//! registra en el log y deja el valor anterior intacto hasta el próximo
//! ciclo; nunca llega al endpoint de métricas ni tumba el proceso.

use crate::error::SondaError;
use crate::gauges::{GaugeStore, MetricKind};
use crate::sampler::Measurement;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Ejecuta el ciclo Sampling → Idle indefinidamente para una métrica.
///
/// El closure de muestreo es inyectable para poder cambiar de herramienta o
/// de estrategia de parseo sin tocar el loop ni el almacén.
pub async fn run_sampler_loop<F, Fut>(
    store: Arc<GaugeStore>,
    kind: MetricKind,
    interval: Duration,
    sample: F,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<Measurement, SondaError>>,
{
    loop {
        match sample().await {
            Ok(measurement) => {
                store.set(kind, measurement.value);
                log::debug!("{} actualizado a {}", kind.name(), measurement.value);
            }
            Err(e) => {
                log::warn!("Fallo al medir {}: {}", kind.name(), e);
            }
        }

        tokio::time::sleep(interval).await;
    }
}
