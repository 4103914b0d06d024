mod host;

pub use host::{parse_host_list, ApiHost};

use crate::secrets::{parse_key_list, ApiKey};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("no Steam API keys configured")]
    NoKeys,
    #[error("no Steam API hosts configured")]
    NoHosts,
    #[error("invalid Steam API host entry: {0:?}")]
    InvalidHost(String),
}

/// The API keys and API hosts a fetcher rotates through.
///
/// Both lists are non-empty and fixed for the pool's lifetime. Selection takes `&self` and
/// draws from fastrand's thread-local generator, so one pool can be shared across tasks.
#[derive(Debug, Clone)]
pub struct ApiPool {
    keys: Vec<ApiKey>,
    hosts: Vec<ApiHost>,
}

impl ApiPool {
    pub fn new(keys: Vec<ApiKey>, hosts: Vec<ApiHost>) -> Result<Self, PoolError> {
        if keys.is_empty() {
            return Err(PoolError::NoKeys);
        }
        if hosts.is_empty() {
            return Err(PoolError::NoHosts);
        }
        Ok(Self { keys, hosts })
    }

    /// Build a pool from the comma-separated forms used in configuration.
    pub fn from_lists(keys: &str, hosts: &str) -> Result<Self, PoolError> {
        Self::new(parse_key_list(keys), parse_host_list(hosts)?)
    }

    pub fn keys(&self) -> &[ApiKey] {
        &self.keys
    }

    pub fn hosts(&self) -> &[ApiHost] {
        &self.hosts
    }

    pub fn pick_key(&self) -> &ApiKey {
        &self.keys[fastrand::usize(..self.keys.len())]
    }

    /// Pick a host uniformly, restricted to the first `affinity_range` entries when set.
    ///
    /// A range of zero is treated as unset; a range past the end covers the whole list.
    pub fn pick_host(&self, affinity_range: Option<usize>) -> &ApiHost {
        let bound = match affinity_range {
            Some(n) if n > 0 => n.min(self.hosts.len()),
            _ => self.hosts.len(),
        };
        &self.hosts[fastrand::usize(..bound)]
    }
}
