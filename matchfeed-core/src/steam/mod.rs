mod id;
mod replay;

pub use id::{
    convert_32_to_64, convert_32_to_64_str, convert_64_to_32, convert_64_to_32_str,
    ANONYMOUS_ACCOUNT_ID, STEAM_ID64_OFFSET,
};
pub use replay::{build_replay_url, ReplayCompression};
