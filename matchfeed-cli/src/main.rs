#![forbid(unsafe_code)]

use clap::Parser;

mod args;
mod cmd;
mod commands;
mod config;
mod exit_codes;
mod observability;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "matchfeed", version, about = "Steam Web API job builder and fetcher for Dota 2 match data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    observability::init(cli.command.quiet());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Descriptor {
            kind,
            payload,
            output,
        } => cmd::descriptor::descriptor_cmd(&kind, payload, output),
        Command::Fetch {
            url,
            alternatives,
            api,
            fetch,
            output,
        } => cmd::fetch::fetch_cmd(url, alternatives, api, fetch, output).await,
        Command::Job {
            kind,
            payload,
            api,
            fetch,
            output,
        } => cmd::job::job_cmd(&kind, payload, api, fetch, output).await,
        Command::Steamid { direction, output } => cmd::steamid::steamid_cmd(direction, output),
        Command::ReplayUrl {
            match_id,
            cluster,
            replay_salt,
            environment,
            output,
        } => cmd::replay::replay_url_cmd(match_id, cluster, replay_salt, &environment, output),
    }
}

impl Command {
    fn quiet(&self) -> bool {
        match self {
            Command::Descriptor { output, .. }
            | Command::Fetch { output, .. }
            | Command::Job { output, .. }
            | Command::Steamid { output, .. }
            | Command::ReplayUrl { output, .. } => output.quiet,
        }
    }
}
