use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pythaw", version, about = "Find handler-reachable heavy initialization in serverless Python")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON instead of concise text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Scan for handler-reachable heavy initialization
    Check {
        /// Files or directories to scan (defaults to the project root)
        paths: Vec<PathBuf>,

        /// Configuration file to read `[tool.pythaw]` from (default: pyproject.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Project root used to resolve imports (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Glob a handler's name must match; repeatable, overrides config defaults
        #[arg(long = "handler-pattern")]
        handler_pattern: Vec<String>,

        /// Glob of paths excluded from handler enumeration; repeatable
        #[arg(long)]
        exclude: Vec<String>,

        /// Rule code to disable; repeatable
        #[arg(long)]
        disable: Vec<String>,
    },

    /// List built-in and configured rules, or explain one in detail
    Rules {
        /// Show the watched qualified name and message for one rule code
        #[arg(long)]
        explain: Option<String>,
    },
}
