pub mod http_probe;

pub use http_probe::HttpProber;

use async_trait::async_trait;

/// Outcome of a single reachability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachability {
    pub reachable: bool,
    /// Offending HTTP status when unreachable, 0 otherwise (also 0 on
    /// transport failure).
    pub status: u16,
}

impl Reachability {
    pub const ONLINE: Reachability = Reachability {
        reachable: true,
        status: 0,
    };

    pub fn offline(status: u16) -> Self {
        Self {
            reachable: false,
            status,
        }
    }

    /// Map an HTTP status to a verdict. Only a fixed set of statuses count as
    /// "gone"; everything else, redirects and other errors included, is online.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 | 404 | 500 | 503 => Self::offline(status),
            _ => Self::ONLINE,
        }
    }
}

#[async_trait]
pub trait Prober {
    /// Issue exactly one request against `url`. Never fails: transport errors
    /// are reported as unreachable with status 0.
    async fn probe(&self, url: &str) -> Reachability;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_statuses() {
        for status in [401, 403, 404, 500, 503] {
            assert_eq!(Reachability::from_status(status), Reachability::offline(status));
        }
    }

    #[test]
    fn test_online_statuses() {
        for status in [200, 204, 301, 302, 400, 410, 429, 502] {
            assert_eq!(Reachability::from_status(status), Reachability::ONLINE);
        }
    }
}
