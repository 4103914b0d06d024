#![forbid(unsafe_code)]

//! Pure building blocks for Dota 2 match data acquisition: job kinds, request descriptors for
//! the Steam Web API, and Steam id helpers. Nothing here performs I/O.

pub mod error;
pub mod factory;
pub mod steam;
pub mod types;

pub use crate::error::{BuildError, SteamIdError};
pub use crate::factory::{build_descriptor, build_descriptor_str, STEAM_API_BASE, STEAM_API_HOST};
pub use crate::steam::{
    build_replay_url, convert_32_to_64, convert_32_to_64_str, convert_64_to_32,
    convert_64_to_32_str, ReplayCompression, ANONYMOUS_ACCOUNT_ID, STEAM_ID64_OFFSET,
};
pub use crate::types::{JobKind, RequestDescriptor};
