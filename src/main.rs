use clap::Parser;
use passvault::cli::{Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();

    // Settings decide the default log level; a broken config is still
    // reported by the command itself.
    let log_level = Context::load(&cli)
        .map(|ctx| ctx.settings.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    init_tracing(&log_level);

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Save {
            ref service,
            ref login,
        } => passvault::cli::commands::save::execute(&cli, service, login.as_deref()),
        Commands::Get { ref service } => passvault::cli::commands::get::execute(&cli, service),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Delete { ref service, force } => {
            passvault::cli::commands::delete::execute(&cli, service, force)
        }
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber, writing to stderr.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
