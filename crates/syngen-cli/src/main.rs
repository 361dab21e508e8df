mod registry;
mod workspace;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use syngen_core::timestamp::DayBoundary;
use syngen_eval::{EvalError, EvaluateOptions, ExportEvaluator};
use syngen_generate::{GenerateOptions, GenerationEngine, GenerationError};
use thiserror::Error;

use registry::{RegistryError, archive_tree, init_logging};
use workspace::{
    GenerateOverrides, WorkDir, WorkspaceError, default_work_dir, load_settings,
    write_json_atomic,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("verification error: {0}")]
    Eval(#[from] EvalError),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("archive error: {source}; export tree left at {work_dir}")]
    Archive {
        source: RegistryError,
        work_dir: String,
    },
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "syngen", version, about = "Synthetic team-chat workspace exports")]
struct Cli {
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a workspace export and archive it.
    Generate(GenerateArgs),
    /// Check an unpacked export tree.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Archive to write.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    /// Number of users [default: 10].
    #[arg(short, long)]
    users: Option<usize>,
    /// Number of channels [default: 25].
    #[arg(short, long)]
    channels: Option<usize>,
    /// Number of messages [default: 1000].
    #[arg(short, long)]
    messages: Option<usize>,
    /// Probability that a message replies to its channel's active thread [default: 0.3].
    #[arg(short = 't', long)]
    thread_probability: Option<f64>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML settings file; flags take precedence over its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory the export tree is written to before archiving.
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,
    /// Keep the work directory after a successful archive.
    #[arg(long, default_value_t = false)]
    keep_work_dir: bool,
    /// Write the generation report as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Cut day files at UTC midnight instead of local midnight.
    #[arg(long, default_value_t = false)]
    utc: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Unpacked export directory.
    #[arg(value_name = "DIR")]
    dir: PathBuf,
    /// Exit with an error when any violation is found.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Day files were cut at UTC midnight.
    #[arg(long, default_value_t = false)]
    utc: bool,
    /// Write metrics.json and report.md into this directory.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Verify(args) => run_verify(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let timer = Instant::now();
    let options = resolve_options(&args)?;
    let output = absolute_output(&args.output)?;

    let work_dir = WorkDir::prepare(args.work_dir.clone().unwrap_or_else(default_work_dir))?;
    tracing::info!(
        event = "run_started",
        work_dir = %work_dir.path().display(),
        output = %output.display()
    );

    let result = match GenerationEngine::new(options).run(work_dir.path()) {
        Ok(result) => result,
        Err(err) => {
            if !args.keep_work_dir {
                if let Err(cleanup) = work_dir.remove() {
                    tracing::warn!(error = %cleanup, "work directory cleanup failed");
                }
            }
            return Err(err.into());
        }
    };

    if let Some(report_path) = &args.report {
        write_json_atomic(report_path, &result.report)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    if output.is_file() {
        std::fs::remove_file(&output).map_err(WorkspaceError::from)?;
    }
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(WorkspaceError::from)?;
    }

    if let Err(source) = archive_tree(work_dir.path(), &output) {
        tracing::error!(
            event = "archive_failed",
            error = %source,
            work_dir = %work_dir.path().display()
        );
        return Err(CliError::Archive {
            source,
            work_dir: work_dir.path().display().to_string(),
        });
    }

    if args.keep_work_dir {
        tracing::info!(event = "work_dir_kept", path = %work_dir.path().display());
    } else {
        work_dir.remove()?;
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        messages = result.report.messages,
        day_files = result.report.day_files,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<(), CliError> {
    let options = EvaluateOptions {
        strict: args.strict,
        day_boundary: if args.utc {
            DayBoundary::Utc
        } else {
            DayBoundary::Local
        },
        out_dir: args.out,
        ..EvaluateOptions::default()
    };

    let result = ExportEvaluator::new(options).run(&args.dir)?;
    println!("{}", result.report);
    Ok(())
}

/// Settings file (or defaults) with command-line values applied on top.
fn resolve_options(args: &GenerateArgs) -> Result<GenerateOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => load_settings(path)?,
        None => GenerateOptions::default(),
    };
    overrides(args).apply(&mut options);
    options
        .validate()
        .map_err(|err| CliError::InvalidConfig(err.to_string()))?;
    Ok(options)
}

fn overrides(args: &GenerateArgs) -> GenerateOverrides {
    GenerateOverrides {
        users: args.users,
        channels: args.channels,
        messages: args.messages,
        thread_probability: args.thread_probability,
        seed: args.seed,
        utc: args.utc,
    }
}

/// The archiver runs inside the work directory, so the output must not be relative.
fn absolute_output(output: &Path) -> Result<PathBuf, CliError> {
    if output.as_os_str().is_empty() {
        return Err(CliError::InvalidConfig("output path is empty".to_string()));
    }
    if output.is_absolute() {
        return Ok(output.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(WorkspaceError::from)?;
    Ok(cwd.join(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(argv).expect("parse arguments");
        match cli.command {
            Command::Generate(args) => args,
            Command::Verify(_) => panic!("expected generate"),
        }
    }

    #[test]
    fn generate_defaults_match_options() {
        let args = generate_args(&["syngen", "generate", "export.zip"]);
        let options = resolve_options(&args).expect("options");
        assert_eq!(options.users, 10);
        assert_eq!(options.channels, 25);
        assert_eq!(options.messages, 1000);
        assert_eq!(options.thread_probability, 0.3);
        assert_eq!(options.day_boundary, DayBoundary::Local);
        assert!(!args.keep_work_dir);
    }

    #[test]
    fn short_flags_set_counts() {
        let args = generate_args(&[
            "syngen", "generate", "-u", "3", "-c", "1", "-m", "5", "-t", "1.0", "--utc",
            "out.zip",
        ]);
        let options = resolve_options(&args).expect("options");
        assert_eq!(
            (options.users, options.channels, options.messages),
            (3, 1, 5)
        );
        assert_eq!(options.thread_probability, 1.0);
        assert_eq!(options.day_boundary, DayBoundary::Utc);
    }

    #[test]
    fn invalid_counts_are_rejected_before_generation() {
        let args = generate_args(&["syngen", "generate", "-c", "0", "out.zip"]);
        assert!(matches!(
            resolve_options(&args),
            Err(CliError::InvalidConfig(_))
        ));

        let args = generate_args(&["syngen", "generate", "-t", "2", "out.zip"]);
        assert!(resolve_options(&args).is_err());
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["syngen", "generate"]).is_err());
    }

    #[test]
    fn verify_parses_flags() {
        let cli = Cli::try_parse_from(["syngen", "--log-file", "run.ndjson", "verify", "--strict", "dir"])
            .expect("parse arguments");
        assert_eq!(cli.log_file, Some(PathBuf::from("run.ndjson")));
        match cli.command {
            Command::Verify(args) => {
                assert!(args.strict);
                assert!(!args.utc);
                assert_eq!(args.dir, PathBuf::from("dir"));
            }
            Command::Generate(_) => panic!("expected verify"),
        }
    }

    #[test]
    fn relative_output_becomes_absolute() {
        let output = absolute_output(Path::new("export.zip")).expect("absolute");
        assert!(output.is_absolute());
        assert!(output.ends_with("export.zip"));
    }
}
