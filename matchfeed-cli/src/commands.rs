use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the request descriptor for a job without fetching it.
    Descriptor {
        kind: String,
        #[command(flatten)]
        payload: PayloadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch a URL with key/host rotation, validation and retries.
    Fetch {
        url: String,
        /// Equivalent mirror URLs; each attempt picks one of these or `url` at random.
        #[arg(long = "alternative", value_name = "URL", conflicts_with_all = ["proxy_affinity_range", "no_retry"])]
        alternatives: Vec<String>,
        #[command(flatten)]
        api: ApiArgs,
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a job's descriptor and fetch it.
    Job {
        kind: String,
        #[command(flatten)]
        payload: PayloadArgs,
        #[command(flatten)]
        api: ApiArgs,
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Convert between 32-bit account ids and 64-bit Steam ids.
    Steamid {
        #[command(subcommand)]
        direction: SteamIdDirection,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the download URL of a match replay.
    ReplayUrl {
        #[arg(long)]
        match_id: u64,
        #[arg(long)]
        cluster: u32,
        #[arg(long)]
        replay_salt: u64,
        /// Deployment environment; `test` selects uncompressed replays.
        #[arg(long = "env", env = "MATCHFEED_ENV", default_value = "production")]
        environment: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SteamIdDirection {
    /// 32-bit account id to 64-bit Steam id.
    To64 { id: String },
    /// 64-bit Steam id to 32-bit account id.
    To32 { id: String },
}
