use serde::{Deserialize, Serialize};
use std::fmt;

use crate::candidate_source::SourceFilter;
use crate::errors::DomainError;

/// A hostname whose A record the agent keeps pointed at a live address.
///
/// Accepts either a table or the compact array form
/// `[subdomain, domain, source_filter?, exclude_tag?]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct DomainTarget {
    pub subdomain: String,

    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_filter: Option<SourceFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_tag: Option<String>,
}

impl DomainTarget {
    pub fn new(subdomain: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            domain: domain.into(),
            source_filter: None,
            exclude_tag: None,
        }
    }

    pub fn with_source_filter(mut self, filter: SourceFilter) -> Self {
        self.source_filter = Some(filter);
        self
    }

    pub fn with_exclude_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclude_tag = Some(tag.into());
        self
    }

    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.subdomain, self.domain)
    }

    /// Exclusion tag with blanks treated as absent.
    pub fn exclusion_tag(&self) -> Option<&str> {
        self.exclude_tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.subdomain.trim().is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty subdomain for '{}'",
                self.domain
            )));
        }
        if self.domain.trim().is_empty() || !self.domain.contains('.') {
            return Err(DomainError::InvalidDomainName(self.domain.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqdn())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Table {
        subdomain: String,
        domain: String,
        #[serde(default)]
        source_filter: Option<String>,
        #[serde(default)]
        exclude_tag: Option<String>,
    },
    Compact(Vec<String>),
}

impl TryFrom<RawTarget> for DomainTarget {
    type Error = DomainError;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        let (subdomain, domain, filter, tag) = match raw {
            RawTarget::Table {
                subdomain,
                domain,
                source_filter,
                exclude_tag,
            } => (subdomain, domain, source_filter, exclude_tag),
            RawTarget::Compact(parts) => {
                if !(2..=4).contains(&parts.len()) {
                    return Err(DomainError::ConfigError(format!(
                        "target needs 2 to 4 elements, got {}",
                        parts.len()
                    )));
                }
                let mut parts = parts.into_iter();
                let subdomain = parts.next().unwrap_or_default();
                let domain = parts.next().unwrap_or_default();
                (subdomain, domain, parts.next(), parts.next())
            }
        };

        let source_filter = filter
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.parse::<SourceFilter>())
            .transpose()?;

        Ok(Self {
            subdomain,
            domain,
            source_filter,
            exclude_tag: tag,
        })
    }
}
