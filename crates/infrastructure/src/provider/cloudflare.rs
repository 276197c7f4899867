//! Cloudflare API v4 adapter for [`DnsRecordApi`].
//!
//! Authentication uses the account e-mail plus global API key headers.
//! Every response is decoded into the typed envelope below; a missing zone
//! or record surfaces as [`DomainError::NotFound`] and an unexpected body
//! as [`DomainError::MalformedResponse`].

use async_trait::async_trait;
use ferrous_failover_application::ports::{ARecord, DnsRecordApi};
use ferrous_failover_domain::config::AccountConfig;
use ferrous_failover_domain::DomainError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";
const AUTH_KEY_HEADER: &str = "X-Auth-Key";

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
    #[allow(dead_code)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct DnsRecord {
    id: String,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    content: String,
    #[serde(default)]
    proxied: bool,
    #[serde(default = "automatic_ttl")]
    ttl: u32,
}

#[derive(Debug, Serialize)]
struct UpdateRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    content: String,
    proxied: bool,
    ttl: u32,
}

/// `1` means "automatic" to Cloudflare.
fn automatic_ttl() -> u32 {
    1
}

impl From<DnsRecord> for ARecord {
    fn from(record: DnsRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            content: record.content,
            proxied: record.proxied,
            ttl: record.ttl,
        }
    }
}

pub struct CloudflareClient {
    http_client: reqwest::Client,
    api_base: String,
    account: AccountConfig,
}

impl CloudflareClient {
    pub fn new(
        api_base: impl Into<String>,
        account: AccountConfig,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Ferrous-Failover/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            account,
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTH_EMAIL_HEADER, &self.account.email)
            .header(AUTH_KEY_HEADER, &self.account.key)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DomainError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| DomainError::ProviderTransport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ProviderStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| DomainError::MalformedResponse(format!("{}: {}", url, e)))?;

        if !envelope.success {
            let messages: Vec<String> = envelope
                .errors
                .iter()
                .map(|m| format!("{} {}", m.code, m.message))
                .collect();
            return Err(DomainError::MalformedResponse(format!(
                "{}: success=false [{}]",
                url,
                messages.join("; ")
            )));
        }

        envelope
            .result
            .ok_or_else(|| DomainError::MalformedResponse(format!("{}: missing result", url)))
    }
}

#[async_trait]
impl DnsRecordApi for CloudflareClient {
    async fn find_zone_id(&self, domain: &str) -> Result<String, DomainError> {
        let url = format!("{}/zones", self.api_base);
        let zones: Vec<Zone> = self
            .send(&url, self.http_client.get(&url).query(&[("name", domain)]))
            .await?;

        let zone = zones
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound(format!("zone {}", domain)))?;
        debug!(domain = %domain, zone_id = %zone.id, "Zone found");
        Ok(zone.id)
    }

    async fn find_a_record(
        &self,
        zone_id: &str,
        fqdn: &str,
    ) -> Result<Option<ARecord>, DomainError> {
        let url = format!("{}/zones/{}/dns_records", self.api_base, zone_id);
        let records: Vec<DnsRecord> = self
            .send(
                &url,
                self.http_client
                    .get(&url)
                    .query(&[("type", "A"), ("name", fqdn)]),
            )
            .await?;

        Ok(records
            .into_iter()
            .find(|r| r.record_type.eq_ignore_ascii_case("A"))
            .map(ARecord::from))
    }

    async fn update_a_record(
        &self,
        zone_id: &str,
        record: &ARecord,
        address: IpAddr,
    ) -> Result<(), DomainError> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.api_base, zone_id, record.id
        );
        let body = UpdateRecord {
            record_type: "A",
            name: &record.name,
            content: address.to_string(),
            proxied: record.proxied,
            ttl: record.ttl,
        };

        let updated: DnsRecord = self.send(&url, self.http_client.put(&url).json(&body)).await?;
        debug!(record_id = %updated.id, content = %updated.content, "Record updated");
        Ok(())
    }
}
