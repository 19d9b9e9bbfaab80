use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lcm")]
#[command(about = "Lifecycle state machine driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transition table
    Table,

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Drive the demo component through an explicit event sequence
    Replay {
        /// Events in order, comma or space separated (e.g. ON_CREATE,ON_START)
        #[arg(long)]
        events: String,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Print a JSON transcript instead of step lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Move the demo component to a target state, dispatching every step
    Drive {
        /// Target state (e.g. RESUMED)
        #[arg(long)]
        to: String,

        /// Events applied before moving (sets the starting state)
        #[arg(long)]
        from_events: Option<String>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Best effort; a missing .env.local is normal outside dev machines.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Table => {
            commands::print_table();
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = lcm_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Replay {
            events,
            config_paths,
            json,
        } => {
            let cfg = commands::load_lifecycle_config(&config_paths)?;
            init_tracing(&cfg.log_filter);
            commands::replay::run(&events, &cfg, json)?;
        }

        Commands::Drive {
            to,
            from_events,
            config_paths,
        } => {
            let cfg = commands::load_lifecycle_config(&config_paths)?;
            init_tracing(&cfg.log_filter);
            commands::drive::run(&to, from_events.as_deref(), &cfg)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured filter. Logs go to stderr so
/// stdout stays machine-readable.
fn init_tracing(config_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
