use actix_web::{web, App, HttpServer};
use turnstile_backend::extractors::JsonLimit;
use turnstile_backend::infra::state::build_state;
use turnstile_backend::services::AssignmentService;
use turnstile_backend::{
    cors_middleware, routes, telemetry, Config, RequestTrace, StructuredLogger, TraceSpan,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Turnstile backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = match build_state().with_db(config.db_profile).build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected ({:?})", config.db_profile);

    let data = web::Data::new(app_state);
    let json_limit = config.max_json_payload_size;
    let assignment = AssignmentService::new().with_max_claim_attempts(config.max_claim_attempts);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(JsonLimit(json_limit))
            .app_data(assignment)
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
