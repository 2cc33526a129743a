//! weave CLI entry point.
//!
//! Usage:
//!   weave                      # Interactive REPL
//!   weave -c <command>         # Execute command and exit
//!   weave --memory             # REPL without touching the host disk

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use weave_repl::config::Config;

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            let config = Config::load()?;
            weave_repl::run(config.kernel_config())?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--memory") => {
            let config = Config::load()?;
            weave_repl::run(config.transient_kernel_config())?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!(
                "weave {} ({} {})",
                env!("CARGO_PKG_VERSION"),
                env!("WEAVE_GIT_HASH"),
                env!("WEAVE_BUILD_DATE")
            );
            Ok(ExitCode::SUCCESS)
        }

        Some("-c") => {
            let cmd = args.get(2).context("-c requires a command argument")?;
            let config = Config::load()?;
            let code = weave_repl::run_command(config.kernel_config(), cmd)?;
            Ok(exit_code(code))
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'weave --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code(code: i64) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

fn print_help() {
    println!(
        r#"weave v{}

Usage:
  weave                        Interactive REPL
  weave -c <command>           Execute command and exit
  weave --memory               Interactive REPL, nothing saved

Options:
  -c <command>                 Execute command string and exit
  --memory                     Keep the filesystem in memory only
  -h, --help                   Show this help
  -V, --version                Show version

Configuration:
  {}
"#,
        env!("CARGO_PKG_VERSION"),
        Config::default_path().display()
    );
}
