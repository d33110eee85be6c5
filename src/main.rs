use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use sqlclause::mode::Mode;
use sqlclause::report::{FileStatus, Report};

/// sqlclause - lay out a SQL statement one clause at a time.
#[derive(Parser, Debug)]
#[command(name = "sqlclause", version, about)]
struct Cli {
    /// SQL files or directories, or "-" for stdin.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Spaces per indent level.
    #[arg(short = 'i', long, value_parser = clap::value_parser!(u8).range(1..=16))]
    indent_width: Option<u8>,

    /// Report files that would change and exit 1, writing nothing.
    #[arg(long)]
    check: bool,

    /// Print a line diff of every change to stderr, writing nothing.
    #[arg(long)]
    diff: bool,

    /// Skip the token-preservation safety check.
    #[arg(long)]
    fast: bool,

    /// Glob pattern for file or directory names to skip (repeatable).
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Config file; defaults to the nearest pyproject.toml or sqlclause.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    workers: WorkerArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// List every reformatted or failing file.
    #[arg(short, long)]
    verbose: bool,

    /// Print errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Hide the progress bar.
    #[arg(long)]
    no_progressbar: bool,

    /// Always color the diff.
    #[arg(long)]
    force_color: bool,

    /// Never color the diff.
    #[arg(long)]
    no_color: bool,
}

#[derive(Args, Debug)]
struct WorkerArgs {
    /// Worker threads; 0 uses every core.
    #[arg(short = 't', long, default_value_t = 0)]
    threads: usize,

    /// Format files one after another on the main thread.
    #[arg(long)]
    single_process: bool,
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        matches!(self.files.as_slice(), [only] if only.as_os_str() == "-")
    }

    /// Command-line flags layered over the values loaded from config.
    fn into_mode(self, base: Mode) -> Mode {
        Mode {
            indent_width: self.indent_width.map_or(base.indent_width, usize::from),
            check: self.check,
            diff: self.diff,
            fast: self.fast,
            exclude: if self.exclude.is_empty() {
                base.exclude
            } else {
                self.exclude
            },
            verbose: self.output.verbose,
            quiet: self.output.quiet,
            no_progressbar: self.output.no_progressbar,
            no_color: self.output.no_color,
            force_color: self.output.force_color,
            threads: self.workers.threads,
            single_process: self.workers.single_process,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let base = match sqlclause::load_config(&cli.files, cli.config.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2);
        }
    };

    let stdin = cli.reads_stdin();
    let files = cli.files.clone();
    let mode = cli.into_mode(base);

    if stdin {
        return match format_stdin(&mode) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(2)
            }
        };
    }

    let report = sqlclause::run(&files, &mode);

    if mode.diff {
        if let Err(e) = report.print_diffs(mode.color_choice()) {
            eprintln!("Error writing diff: {}", e);
        }
    }
    if mode.verbose {
        list_files(&report, &mode);
    }
    if !mode.quiet {
        eprintln!("{}", report.summary());
    }
    report.print_errors();

    if report.has_errors() {
        ExitCode::from(2)
    } else if mode.check && report.has_changes() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn format_stdin(mode: &Mode) -> anyhow::Result<()> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("reading stdin")?;

    let formatted = sqlclause::format_string(&source, mode).context("formatting stdin")?;
    print!("{}", formatted);
    Ok(())
}

/// Name each changed file; failures are listed by `print_errors`.
fn list_files(report: &Report, mode: &Mode) {
    let verb = if mode.check || mode.diff {
        "would reformat"
    } else {
        "reformatted"
    };
    for result in &report.results {
        if result.status == FileStatus::Changed {
            eprintln!("{} {}", verb, result.path.display());
        }
    }
}
