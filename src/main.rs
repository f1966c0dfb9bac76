use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod classify;
mod compare;
mod diff;
mod error;
mod parse;
mod report;
mod value;

use classify::EnvPair;
use report::models::RunContext;

#[derive(Parser)]
#[command(name = "envdiff", about = "Compare environment configs & flag drift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every .properties file between two environment directories
    Properties {
        /// Directory containing one subdirectory per environment
        dir: String,
        /// First environment label (left side)
        env1: String,
        /// Second environment label (right side)
        env2: String,
        #[command(flatten)]
        opts: CompareOpts,
    },
    /// Compare workspace tfvars files between two environments
    Tfvars {
        /// Directory containing workspace_vars.<env>.tfvars files
        dir: String,
        env1: String,
        env2: String,
        #[command(flatten)]
        opts: CompareOpts,
    },
    /// Compare two JSON configuration snapshots section by section
    Json {
        /// Snapshot for the first environment
        left: String,
        /// Snapshot for the second environment
        right: String,
        env1: String,
        env2: String,
        #[command(flatten)]
        opts: CompareOpts,
    },
}

#[derive(Args)]
struct CompareOpts {
    /// Output format: text, json, or html
    #[arg(long, default_value = "text")]
    format: String,
    /// Write output to file instead of stdout
    #[arg(long)]
    output: Option<String>,
    /// Extra environment indicator token for the classifier (repeatable)
    #[arg(long = "indicator")]
    indicators: Vec<String>,
    /// Branch name shown in the report header
    #[arg(long)]
    branch: Option<String>,
    /// Commit id shown in the report header
    #[arg(long)]
    commit: Option<String>,
    /// Commit message shown in the report header
    #[arg(long)]
    message: Option<String>,
}

impl CompareOpts {
    fn envs(&self, env1: &str, env2: &str) -> EnvPair {
        EnvPair::new(env1, env2, self.indicators.clone())
    }

    fn context(&self) -> Option<RunContext> {
        Some(RunContext {
            branch: self.branch.clone(),
            commit: self.commit.clone(),
            message: self.message.clone(),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let has_unexpected = match cli.command {
        Commands::Properties {
            dir,
            env1,
            env2,
            opts,
        } => report::run_properties(
            &dir,
            &opts.envs(&env1, &env2),
            opts.context(),
            &opts.format,
            opts.output.as_deref(),
        )?,
        Commands::Tfvars {
            dir,
            env1,
            env2,
            opts,
        } => report::run_tfvars(
            &dir,
            &opts.envs(&env1, &env2),
            opts.context(),
            &opts.format,
            opts.output.as_deref(),
        )?,
        Commands::Json {
            left,
            right,
            env1,
            env2,
            opts,
        } => report::run_json(
            &left,
            &right,
            &opts.envs(&env1, &env2),
            opts.context(),
            &opts.format,
            opts.output.as_deref(),
        )?,
    };
    if has_unexpected {
        std::process::exit(1);
    }
    Ok(())
}
