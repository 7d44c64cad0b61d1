pub mod collector;
pub mod config;
pub mod error;
pub mod gauges;
pub mod http;
pub mod sampler;

use std::sync::Arc;

use config::Config;
use gauges::GaugeStore;

/// Estado compartido entre el endpoint de métricas y los loops de recolección.
pub struct AppState {
    pub config: Config,
    pub gauges: Arc<GaugeStore>,
}
