//! LED Hub binary
//!
//! Runs the broadcast hub that keeps ESP32 LED clients on the same color.

use clap::{Args, Parser, Subcommand};
use led_hub::{
    state::{DEFAULT_COLOR, DEFAULT_INTENSITY},
    start_web_server, LedState, WebConfig, DEFAULT_WEB_PORT,
};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "led_hub")]
#[command(about = "💡 LED Hub - shared color state for ESP32 clients")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Broadcasts color, intensity and reset commands to every connected LED client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the hub (default)
    Serve(ServeArgs),

    /// Print the HTTP and WebSocket routes and exit
    Routes,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Maximum WebSocket connections
    #[arg(long, default_value_t = 100)]
    max_connections: usize,

    /// Initial color as "R,G,B"
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,

    /// Initial intensity
    #[arg(long, default_value = DEFAULT_INTENSITY)]
    intensity: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(&cli, args).await?,
        Some(Commands::Routes) => routes_command(&cli),
        None => {
            // Default to serve command
            let serve_args = ServeArgs {
                max_connections: 100,
                color: DEFAULT_COLOR.to_string(),
                intensity: DEFAULT_INTENSITY.to_string(),
                ..Default::default()
            };
            serve_command(&cli, &serve_args).await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn build_config(cli: &Cli, args: &ServeArgs) -> WebConfig {
    WebConfig::new(&cli.host, cli.port)
        .with_cors(!args.no_cors)
        .with_max_websocket_connections(args.max_connections)
        .with_initial_state(LedState::new(&args.color, &args.intensity))
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    let config = build_config(cli, args);

    println!("🚀 LED hub running at http://{}", config.bind_address());
    info!("Hub configuration:");
    info!("  - Bind address: {}", config.bind_address());
    info!("  - CORS enabled: {}", config.enable_cors);
    info!("  - Max WebSocket connections: {}", config.max_websocket_connections);
    info!(
        "  - Initial state: color={} intensity={}",
        config.initial_state.color, config.initial_state.intensity
    );

    start_web_server(config).await?;

    Ok(())
}

fn routes_command(cli: &Cli) {
    let base = format!("{}:{}", cli.host, cli.port);
    println!("💡 LED Hub routes");
    println!("=================");
    println!("  POST http://{}/reset-all", base);
    println!("  POST http://{}/led/:rgb/:intensity", base);
    println!("  POST http://{}/led/:rgb", base);
    println!("  GET  http://{}/ping", base);
    println!("  GET  http://{}/api/health", base);
    println!("  GET  http://{}/api/state", base);
    println!("  WS   ws://{}/ (upgrades accepted on any path)", base);
}
