//! bibstyle CLI entry point.

use bibstyle_language::VmConfig;
use bibstyle_runtime::{Repl, Session};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BIBSTYLE_LOG";

/// CLI configuration parsed from arguments.
#[derive(Default)]
#[allow(clippy::struct_excessive_bools)]
struct CliConfig {
    file: Option<PathBuf>,
    repl: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
    dump_stack: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-i" | "--repl" => config.repl = true,
            "--trace" => config.trace = true,
            "--dump-stack" => config.dump_stack = true,
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {flag}").into());
            }
            path => {
                if config.file.is_some() {
                    return Err(format!("unexpected extra file: {path}").into());
                }
                config.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(config)
}

fn init_logging(trace: bool) {
    let default = if trace { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("bibstyle {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.trace);

    let vm_config = VmConfig::default().with_trace_commands(config.trace);
    let session = Session::new().with_config(vm_config);

    match config.file {
        Some(file) if !config.repl => render_file(session, &file, config.dump_stack),
        file => {
            let mut repl = Repl::new()?.with_session(session);
            if let Some(file) = file {
                print!("{}", repl.load_file(&file)?);
                repl = repl.without_banner();
            }
            repl.run()?;
            Ok(())
        }
    }
}

fn render_file(
    mut session: Session,
    file: &Path,
    dump_stack: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    session.load_file(file)?;
    let output = session.render()?;
    print!("{output}");

    if dump_stack {
        if let Some(ctx) = session.last_context() {
            eprintln!("\x1b[1;36m=== Stack ({} values) ===\x1b[0m", ctx.stack().len());
            for value in ctx.stack().iter().rev() {
                eprintln!("  {value}");
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mbibstyle\x1b[0m - BibTeX style (.bst) interpreter

\x1b[1mUSAGE:\x1b[0m
    bibstyle [OPTIONS] [FILE]

\x1b[1mARGUMENTS:\x1b[0m
    [FILE]    Style file to render against an empty bibliography

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -i, --repl         Start the REPL (after running FILE, if given)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace            Log every executed command
    --dump-stack       Print the operand stack left after rendering

\x1b[1mENVIRONMENT:\x1b[0m
    {LOG_ENV}       Log filter, e.g. \"debug\" (default: warn)

\x1b[1mEXAMPLES:\x1b[0m
    bibstyle                      Start interactive REPL
    bibstyle plain.bst            Render plain.bst and print the output
    bibstyle -i plain.bst         Run plain.bst, then start REPL
    bibstyle --trace plain.bst    Render with command tracing"
    );
}
