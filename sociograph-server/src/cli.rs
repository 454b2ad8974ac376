use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for sociograph-server
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub session_ttl_hours: Option<u64>,
    pub seed_demo_data: Option<bool>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("sociograph-server")
            .version(sociograph::VERSION)
            .about("HTTP API server for the Sociograph relationship graph engine")
            .long_about(
                r#"Sociograph Server exposes the relationship graph engine over a
REST API: follow/friend actions, pending request queues, follower
listings, and profile visibility checks.

The server can be configured through command line arguments or
environment variables. Command line arguments take precedence.

Examples:
  sociograph-server --port 8080
  sociograph-server --config sociograph.toml --seed-demo
  sociograph-server --session-ttl 8 --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: SOCIOGRAPH_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML or JSON configuration file for the
sociograph library (storage backend, logging).
Environment variable: SOCIOGRAPH_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("session_ttl")
                    .long("session-ttl")
                    .value_name("HOURS")
                    .help("Session token time-to-live in hours")
                    .long_help(
                        "How long issued session tokens remain valid.
Default is 24 hours.
Environment variable: SOCIOGRAPH_SESSION_TTL_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("seed_demo")
                    .long("seed-demo")
                    .help("Seed demo users and session tokens on startup")
                    .long_help(
                        "Populate the in-memory user directory with a handful of
demo users and print a session token for each, so the API can be
exercised immediately. Only meaningful in development.
Environment variable: SOCIOGRAPH_SEED_DEMO_DATA",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: SOCIOGRAPH_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            session_ttl_hours: matches.get_one::<u64>("session_ttl").copied(),
            seed_demo_data: if matches.get_flag("seed_demo") {
                Some(true)
            } else {
                None
            },
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Sociograph Server Environment Variables");
        println!("=======================================");
        println!();
        println!("Server Configuration:");
        println!("  SOCIOGRAPH_PORT                - Server port (default: 3000)");
        println!("  SOCIOGRAPH_MAX_REQUEST_SIZE    - Max request body size in bytes (default: 1MB)");
        println!("  SOCIOGRAPH_CONFIG_FILE         - Path to library config file (TOML or JSON)");
        println!();
        println!("Sessions:");
        println!("  SOCIOGRAPH_SESSION_TTL_HOURS   - Session token TTL in hours (default: 24)");
        println!();
        println!("Development:");
        println!("  SOCIOGRAPH_SEED_DEMO_DATA      - Seed demo users on startup (default: false)");
        println!();
        println!("Library configuration (nested keys use double underscores):");
        println!("  SOCIOGRAPH_LOGGING__LEVEL      - trace, debug, info, warn, error");
        println!("  SOCIOGRAPH_LOGGING__FORMAT     - pretty, compact, json");
        println!("  SOCIOGRAPH_STORAGE__BACKEND    - memory");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                       - Logging filter (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
