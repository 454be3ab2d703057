use kontowart::{config::Config, router, scheduler, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address.clone();
    let state = startup::build_app_state(db, config);

    startup::start_entry_feed(&state);

    if let Err(e) = startup::warm_entry_cache(&state).await {
        tracing::error!("Failed to warm the entry mirror: {:?}", e);
    }

    if let Err(e) = scheduler::start_scheduler(state.monitor.clone()).await {
        eprintln!("Scheduler error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Starting server on {}", bind_address);

    let router = router::routes().with_state(state);

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
