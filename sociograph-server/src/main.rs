use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use sociograph::config::{ConfigBuilder, ConfigLoader};
use sociograph::directory::InMemoryUserDirectory;
use sociograph::models::{ProfileType, UserId, UserSummary};

use sociograph_server::api::sessions::{MemorySessionStore, SessionStore};
use sociograph_server::cli::CliArgs;
use sociograph_server::config::ServerConfig;
use sociograph_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Sociograph server v{}", sociograph::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    // Library configuration: load from file if provided
    let graph_config = if let Some(config_file) = &server_config.config_file_path {
        info!("Loading configuration from: {}", config_file.display());

        let mut loader = ConfigLoader::new();
        match loader.load_file(config_file).map(|loader| loader.load_env().extract()) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) | Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    config_file.display(),
                    e
                );
                ConfigBuilder::defaults().build()?
            }
        }
    } else {
        ConfigBuilder::defaults().build()?
    };

    // The user directory is an external collaborator; the bundled
    // in-memory directory serves development and demos.
    let directory = Arc::new(InMemoryUserDirectory::new());
    let service = sociograph::init(graph_config, directory.clone()).await?;
    info!("Relationship service initialized");

    let sessions = Arc::new(MemorySessionStore::new(server_config.session_ttl_hours));

    let app_state = Arc::new(AppState::new(
        service,
        directory,
        sessions,
        server_config.clone(),
    ));

    if server_config.seed_demo_data {
        seed_demo_data(&app_state).await;
    }

    // Create the router with all API endpoints
    let app = create_router(app_state)
        .layer(axum::extract::DefaultBodyLimit::max(
            server_config.max_request_size,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Populate the directory with demo users and print a session token
/// for each, so the API can be exercised immediately.
async fn seed_demo_data(state: &AppState) {
    let demo_users = [
        (1, "Ada Lovelace", "ada", ProfileType::Public),
        (2, "Grace Hopper", "grace", ProfileType::Private),
        (3, "Alan Turing", "alan", ProfileType::Public),
    ];

    for (id, name, username, profile_type) in demo_users {
        state.directory.upsert(UserSummary {
            id: UserId(id),
            name: name.to_string(),
            username: username.to_string(),
            profile_type,
        });
        let token = state.sessions.issue(UserId(id)).await;
        info!("Demo user {username} (id {id}, {profile_type}) token: {token}");
    }

    warn!("Demo data seeded; tokens above grant full API access. Development only.");
}
