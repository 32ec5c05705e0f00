#![forbid(unsafe_code)]
#![deny(warnings, unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
pub mod codegen;
pub mod config;
pub mod emitter;
pub mod error;
pub mod ir;
pub mod model;

pub use config::{GeneratorHooks, GeneratorOptions, NullableMapping};
pub use emitter::{GeneratedModule, Generator};
pub use error::GenerateError;

#[derive(Parser)]
#[command(
    name = "tsclientgen",
    version,
    about = "Generate typed TypeScript API clients from a server-side type model"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the TypeScript modules from a JSON type model
    Generate(cli::generate::GenerateArgs),
}

pub fn run_cli(args: Vec<String>) -> i32 {
    init_tracing();
    match Cli::try_parse_from(args) {
        Ok(parsed) => match parsed.command {
            Some(Commands::Generate(generate_args)) => cli::generate::run(generate_args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    let crate_root = module_path!().to_string();

    // TSCLIENTGEN_LOG controls log level: "trace", "debug", "info", "warn",
    // "error" or a full tracing filter spec like "tsclientgen=debug"
    let filter = match std::env::var("TSCLIENTGEN_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("{crate_root}={level}")
        }
        Ok(spec) => spec,
        Err(_) => format!("{crate_root}=info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
