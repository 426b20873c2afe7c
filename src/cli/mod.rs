//! CLI for lintpipe
//!
//! - `run`: install the configured lint tool, run it, publish the report
//! - `plan`: show the stages and lint command without executing anything
//! - `completions`: generate shell completions
//!
//! Configuration precedence: CLI flag, then the hosting CI system's
//! `INPUT_*` environment variable, then the optional config file, then the
//! profile defaults.

pub mod completions;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use lintpipe::executor::{ShellConfig, SystemRunner};
use lintpipe::infrastructure::FsArtifactStore;
use lintpipe::pipeline::{
    Driver, LintConfig, PartialConfig, PipelineOutcome, Profile, env_inputs, is_truthy,
};

/// CLI arguments for lintpipe
#[derive(Parser, Debug)]
#[command(name = "lintpipe")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the configured lint tool, run it, and publish the report
    Run {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Show the stages and lint command a run would execute
    Plan {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug, Default)]
struct RunOptions {
    /// Lint tool to run (flake8, pylint, pycodestyle, pyflakes, black, mypy)
    #[arg(long)]
    tool: Option<String>,

    /// File, directory or glob handed to the tool
    #[arg(long)]
    path: Option<String>,

    /// Destination file name for the report
    #[arg(long)]
    artifact_name: Option<String>,

    /// Pass the tool's verbose flag
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    verbose: Option<String>,

    /// Colorize tool output
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    color: Option<String>,

    /// Request count/statistics output
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    statistics: Option<String>,

    /// Extra text appended to the lint command
    #[arg(long)]
    arguments: Option<String>,

    /// Default profile
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Partial configuration file (YAML, or JSON with a .json extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory artifacts are stored under
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Directory the lint command runs in
    #[arg(long)]
    workdir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Classic,
    Modern,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Classic => Profile::Classic,
            ProfileArg::Modern => Profile::Modern,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    use clap::CommandFactory;
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Run { options } => {
            let driver = driver_for(&options)?;
            match driver.run()? {
                PipelineOutcome::Completed(stored) => {
                    tracing::info!(artifact = %stored.location.display(), "Report published");
                }
                // The warning was already emitted; the skip exits zero.
                PipelineOutcome::SkippedUnsupportedTool { .. } => {}
            }
            Ok(())
        }
        Command::Plan { options } => {
            let driver = driver_for(&options)?;
            if let Some(command) = driver.plan()? {
                println!("{command}");
            }
            Ok(())
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let generated = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&generated, &output_path)?;
            } else {
                println!("{generated}");
            }
            Ok(())
        }
    }
}

/// Assembles a driver from resolved configuration and host collaborators.
fn driver_for(options: &RunOptions) -> Result<Driver<SystemRunner, FsArtifactStore>> {
    let config = resolve_config(options)?;

    let workdir = match &options.workdir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve the working directory")?,
    };

    let runner = SystemRunner::new(ShellConfig {
        cwd: workdir.clone(),
        ..ShellConfig::default()
    });

    let store = match &options.store_dir {
        Some(dir) => FsArtifactStore::new(dir),
        None => FsArtifactStore::default(),
    };

    Ok(Driver::new(config, runner, store).with_workdir(workdir))
}

fn resolve_config(options: &RunOptions) -> Result<LintConfig> {
    let mut layers = vec![flags_layer(options), env_inputs()];
    if let Some(path) = &options.config {
        layers.push(load_config_file(path)?);
    }

    LintConfig::resolve(&layers).context("Invalid configuration")
}

/// Converts the CLI flags into a configuration layer.
fn flags_layer(options: &RunOptions) -> PartialConfig {
    PartialConfig {
        tool: options.tool.clone(),
        path: options.path.clone(),
        artifact_name: options.artifact_name.clone(),
        verbose: options.verbose.as_deref().map(is_truthy),
        color: options.color.as_deref().map(is_truthy),
        statistics: options.statistics.as_deref().map(is_truthy),
        arguments: options.arguments.clone(),
        profile: options.profile.map(Profile::from),
    }
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON config: {}", path.display()))
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML config: {}", path.display()))
    }
}
