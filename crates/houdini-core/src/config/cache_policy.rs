use serde::Deserialize;
use serde::Serialize;

/// How a query's result is read from and written to the runtime cache.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum CachePolicy {
    CacheAndNetwork,
    CacheOnly,
    #[default]
    CacheOrNetwork,
    NetworkOnly,
    NoCache,
}
impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::CacheAndNetwork => "CacheAndNetwork",
            CachePolicy::CacheOnly => "CacheOnly",
            CachePolicy::CacheOrNetwork => "CacheOrNetwork",
            CachePolicy::NetworkOnly => "NetworkOnly",
            CachePolicy::NoCache => "NoCache",
        }
    }

    pub fn parse(policy: &str) -> Option<Self> {
        Some(match policy {
            "CacheAndNetwork" => CachePolicy::CacheAndNetwork,
            "CacheOnly" => CachePolicy::CacheOnly,
            "CacheOrNetwork" => CachePolicy::CacheOrNetwork,
            "NetworkOnly" => CachePolicy::NetworkOnly,
            "NoCache" => CachePolicy::NoCache,
            _ => return None,
        })
    }
}
