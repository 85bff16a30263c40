use actix_web::{web, App, HttpServer};
use pairflip_backend::config::AppConfig;
use pairflip_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use pairflip_backend::routes;
use pairflip_backend::state::build_state;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let (host, port) = config.bind_addr();
    info!(
        host = %host,
        port,
        resolve_delay_ms = config.resolve_delay.as_millis() as u64,
        auto_resolve = config.auto_resolve,
        "starting pairflip backend"
    );

    let data = web::Data::new(build_state().with_config(config).build());

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
