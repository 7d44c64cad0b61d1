use std::{net::SocketAddr, sync::Arc, time::Duration};

use dotenvy::dotenv;
use env_logger::Env;

use sonda::collector::run_sampler_loop;
use sonda::config::Config;
use sonda::gauges::{GaugeStore, MetricKind};
use sonda::{http, sampler, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Configuración ausente o inválida: salir antes de arrancar nada
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let gauges = Arc::new(GaugeStore::new()?);
    let interval = Duration::from_secs(config.sample_interval_secs);

    // Loop de latencia
    {
        let gauges = Arc::clone(&gauges);
        let target = config.target.clone();
        tokio::spawn(async move {
            run_sampler_loop(gauges, MetricKind::Latency, interval, move || {
                let target = target.clone();
                async move { sampler::measure_latency(&target).await }
            })
            .await;
        });
    }

    // Loop de ancho de banda
    {
        let gauges = Arc::clone(&gauges);
        let target = config.target.clone();
        let test_secs = config.bandwidth_test_secs;
        tokio::spawn(async move {
            run_sampler_loop(gauges, MetricKind::Bandwidth, interval, move || {
                let target = target.clone();
                async move { sampler::measure_bandwidth(&target, test_secs).await }
            })
            .await;
        });
    }

    let addr: SocketAddr = config.listen_addr.parse()?;
    let state = Arc::new(AppState { config, gauges });
    let app = http::router(state);

    log::info!("📡 Métricas de red expuestas en http://{}/metrics", addr);

    // No poder escuchar en el puerto de scrape es fatal
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
