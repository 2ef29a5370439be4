use anyhow::{Context, Result};
use clap::Parser;
use pyexplain::config::{Config, DEFAULT_EXAMPLE};
use pyexplain::executor::ExecutionCoordinator;
use pyexplain::explain::explain_source;
use pyexplain::interpreter::{PythonProcess, TerminalInput};
use pyexplain::server;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pyexplain", version, about = "Explain and run beginner Python code")]
struct Args {
    /// Python file to explain and run. Uses a built-in example when omitted.
    file: Option<PathBuf>,

    /// Serve Content-Length framed JSON requests on stdin/stdout.
    #[arg(long)]
    serve: bool,

    /// Interpreter command line, e.g. "python3 -I".
    #[arg(long)]
    python: Option<String>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(python) = &args.python {
        config
            .set_python_command(python)
            .context("parsing --python")?;
    }

    // stdout carries protocol messages and program output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let interpreter = PythonProcess::new(config.python.clone())?;

    if args.serve {
        server::run_server_mode(interpreter)?;
    } else {
        run_interactive_mode(interpreter, args.file)?;
    }
    Ok(())
}

fn run_interactive_mode(interpreter: PythonProcess, file: Option<PathBuf>) -> Result<()> {
    let source = match &file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => DEFAULT_EXAMPLE.to_string(),
    };
    info!(file = ?file, "interactive mode");

    println!("=== Line-by-line explanation ===");
    for record in explain_source(&source) {
        let code = if record.text.is_empty() { "(blank)" } else { record.text.as_str() };
        println!("{:>4} | {}", record.line_number, code);
        println!("     └─ {}", record.explanation);
    }

    let mut coordinator = ExecutionCoordinator::new(interpreter);
    let result = coordinator.run(&source, &mut TerminalInput);

    println!("\n=== Output ===");
    println!("{}", result.captured_output);

    println!("\n=== Error / Hints ===");
    match &result.failure {
        None => println!("No errors detected."),
        Some(failure) => {
            println!("{}", failure.friendly_message);
            for hint in &failure.hints {
                println!("  • {}", hint);
            }
        }
    }
    eprintln!("{}", coordinator.status());
    Ok(())
}
