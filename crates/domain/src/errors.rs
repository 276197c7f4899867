use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid candidate source: {0}")]
    InvalidCandidateSource(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider request to {url} failed: {reason}")]
    ProviderTransport { url: String, reason: String },

    #[error("Provider returned HTTP {status} for {url}")]
    ProviderStatus { url: String, status: u16 },

    #[error("Publishing failed after {attempts} attempts")]
    PublishFailed { attempts: u32 },

    #[error("Candidate feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Candidate feed archive error: {0}")]
    FeedArchive(String),

    #[error("Resolution of {host} failed: {reason}")]
    ResolutionFailed { host: String, reason: String },

    #[error("Health check of {url} failed: {reason}")]
    HealthCheckFailed { url: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
