use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Metadata of one feed entry, encoded in archive entry names as
/// `{identifier}-{tlsFlag}-{port}[.txt]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateSource {
    pub identifier: String,
    pub tls_flag: String,
    pub port: u16,
}

impl CandidateSource {
    pub fn new(identifier: impl Into<String>, tls: bool, port: u16) -> Self {
        Self {
            identifier: identifier.into(),
            tls_flag: if tls { "1" } else { "0" }.to_string(),
            port,
        }
    }

    /// Parses an archive entry name. The identifier may itself contain `-`;
    /// the last two segments are always the tls flag and the port.
    pub fn from_entry_name(name: &str) -> Result<Self, DomainError> {
        let stem = name.rsplit('/').next().unwrap_or(name);
        let stem = stem.strip_suffix(".txt").unwrap_or(stem);

        let (identifier, tls_flag, port) = split_three(stem)
            .ok_or_else(|| DomainError::InvalidCandidateSource(name.to_string()))?;

        let port = port
            .parse::<u16>()
            .map_err(|_| DomainError::InvalidCandidateSource(format!("{}: bad port", name)))?;

        Ok(Self {
            identifier: identifier.to_string(),
            tls_flag: tls_flag.to_string(),
            port,
        })
    }

    /// A tls flag of `0` means plain http; anything else means https.
    pub fn uses_tls(&self) -> bool {
        self.tls_flag != "0"
    }

    pub fn scheme(&self) -> &'static str {
        if self.uses_tls() {
            "https"
        } else {
            "http"
        }
    }

    pub fn health_url(&self, host: &str) -> String {
        format!("{}://{}:{}", self.scheme(), host, self.port)
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.identifier, self.tls_flag, self.port)
    }
}

/// One downloaded list of candidate lines with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub source: CandidateSource,
    pub content: String,
}

impl FeedEntry {
    pub fn new(source: CandidateSource, content: impl Into<String>) -> Self {
        Self {
            source,
            content: content.into(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `id-tls-port` pattern selecting feed entries; each part may be `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceFilter {
    identifier: String,
    tls_flag: String,
    port: String,
}

impl SourceFilter {
    pub fn matches(&self, source: &CandidateSource) -> bool {
        part_matches(&self.identifier, &source.identifier)
            && part_matches(&self.tls_flag, &source.tls_flag)
            && part_matches(&self.port, &source.port.to_string())
    }
}

impl FromStr for SourceFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (identifier, tls_flag, port) = split_three(s.trim())
            .ok_or_else(|| DomainError::InvalidCandidateSource(format!("filter '{}'", s)))?;

        if port != "*" && port.parse::<u16>().is_err() {
            return Err(DomainError::InvalidCandidateSource(format!(
                "filter '{}': bad port",
                s
            )));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            tls_flag: tls_flag.to_string(),
            port: port.to_string(),
        })
    }
}

impl TryFrom<String> for SourceFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceFilter> for String {
    fn from(filter: SourceFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.identifier, self.tls_flag, self.port)
    }
}

fn part_matches(pattern: &str, value: &str) -> bool {
    pattern == "*" || pattern == value
}

fn split_three(s: &str) -> Option<(&str, &str, &str)> {
    let mut parts = s.rsplitn(3, '-');
    let port = parts.next()?;
    let tls = parts.next()?;
    let identifier = parts.next()?;
    if identifier.is_empty() || tls.is_empty() || port.is_empty() {
        return None;
    }
    Some((identifier, tls, port))
}
