//! RCSC UI build CLI
//!
//! Entry point for the `rcsc-ui-build` command-line tool.

use clap::{Parser, Subcommand};
use rcsc_descriptor::resolve_injected;
use rcsc_ui_build::build::{self, Mode};
use rcsc_ui_build::engine::{BundlerEngine, JsonEmitter};
use rcsc_ui_build::env::{self, EnvMap};
use rcsc_ui_build::EffectiveSettings;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rcsc-ui-build")]
#[command(about = "Compose the RCSC UI bundler configuration", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the effective build descriptor for one target environment
    Descriptor {
        /// Target environment (development or production)
        #[arg(long, short = 'm', value_enum)]
        mode: Mode,

        /// Directory holding rcsc-ui.toml; the project root resolves against it (default: current directory)
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Settings file (default: <root>/rcsc-ui.toml when present)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Write the artifact here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the flags resolved from the current environment
    Flags,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Descriptor {
            mode,
            root,
            config,
            output,
        } => run_descriptor(mode, root, config, output),
        Commands::Flags => run_flags(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn process_env() -> EnvMap {
    env::collect_env(std::env::vars_os())
}

fn run_descriptor(mode: Mode, root: PathBuf, config: Option<PathBuf>, output: Option<PathBuf>) {
    let settings = match EffectiveSettings::build(&root, config.as_deref(), None) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };

    let descriptor = build::effective(mode, &settings.layout);
    let mut engine = JsonEmitter::new(mode, settings.sources.clone());
    let artifact = match engine.build(&descriptor) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error rendering descriptor: {}", e);
            process::exit(1);
        }
    };

    if env::admin_secret_diverges(&process_env()) {
        tracing::warn!(
            "CS_ADMIN_SECRET is not set; the bundle inlines a default that differs from the runtime fallback"
        );
    }

    match output {
        Some(path) => {
            if let Err(e) = artifact.write_to_file(&path) {
                eprintln!("Error writing {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => match artifact.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        },
    }
}

fn run_flags() {
    let vars = process_env();
    let flags = env::resolve(&vars);
    let build_time = resolve_injected(&env::build_time_defaults(), &vars);

    let output = serde_json::json!({
        "runtime": flags.to_value(),
        "buildTime": build_time,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
