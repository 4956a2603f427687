//! pythaw CLI — flags handler-reachable heavy initialization in
//! serverless Python. See `pythaw --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let formatter: Box<dyn pythaw_output::OutputFormatter> = if cli.json {
        Box::new(pythaw_output::json::JsonFormatter)
    } else {
        Box::new(pythaw_output::concise::ConciseFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            paths,
            config,
            root,
            handler_pattern,
            exclude,
            disable,
        } => commands::check::run(&*formatter, paths, config, root, handler_pattern, exclude, disable),
        Commands::Rules { explain } => commands::rules::run(&*formatter, explain),
    };

    std::process::exit(exit_code);
}
