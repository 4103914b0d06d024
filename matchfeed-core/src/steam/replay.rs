/// Which replay artifact the replay hosts should be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayCompression {
    /// `.dem.bz2`, what the live replay CDN serves.
    #[default]
    Bzip2,
    /// `.dem`, used by test fixtures.
    None,
}

impl ReplayCompression {
    pub fn suffix(&self) -> &'static str {
        match self {
            ReplayCompression::Bzip2 => ".dem.bz2",
            ReplayCompression::None => ".dem",
        }
    }
}

pub fn build_replay_url(
    match_id: u64,
    cluster: u32,
    replay_salt: u64,
    compression: ReplayCompression,
) -> String {
    format!(
        "http://replay{cluster}.valve.net/570/{match_id}_{replay_salt}{}",
        compression.suffix()
    )
}
