//! CDP customers endpoint client
//!
//! One GET per query against
//! `{base_url}/api/businessunits/{business_unit}/views/{view}/customers`,
//! with the user key, secret and query text as query parameters.

use super::source::ProfileSource;
use crate::config::{CdpConfig, SecretString};
use crate::domain::{CdpError, ProfileQuery, QueryResult, ReportError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// HTTP client for the CDP customers endpoint
///
/// # Example
///
/// ```no_run
/// use cdp_report::adapters::cdp::{CdpClient, ProfileSource};
/// use cdp_report::config::CdpConfig;
/// use cdp_report::domain::{Predicate, ProfileQuery};
///
/// # async fn example() -> cdp_report::domain::Result<()> {
/// let client = CdpClient::new(&CdpConfig::default())?;
/// let query = ProfileQuery::crm_ids(Predicate::eq("attributes.country", "GB"));
/// let result = client.query(&query).await?;
/// println!("{} profiles", result.total_count_display());
/// # Ok(())
/// # }
/// ```
pub struct CdpClient {
    endpoint: Url,
    client: Client,
    user_key: SecretString,
    secret: SecretString,
}

impl CdpClient {
    /// Create a new CDP client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot host the
    /// customers endpoint or the HTTP client cannot be built.
    pub fn new(config: &CdpConfig) -> Result<Self> {
        let endpoint = customers_endpoint(&config.base_url, &config.business_unit, &config.view)
            .map_err(|e| ReportError::Configuration(e.to_string()))?;

        let mut builder = ClientBuilder::new();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build().map_err(|e| {
            ReportError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            endpoint,
            client,
            user_key: config.user_key.clone(),
            secret: config.secret.clone(),
        })
    }

    /// The customers endpoint, without credentials
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileSource for CdpClient {
    async fn query(&self, query: &ProfileQuery) -> Result<QueryResult> {
        let query_text = query.to_string();

        tracing::debug!(
            endpoint = %self.endpoint,
            query = %query_text,
            "Querying CDP customers"
        );

        let user_key: &str = self.user_key.expose_secret().as_ref();
        let secret: &str = self.secret.expose_secret().as_ref();

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("userKey", user_key),
                ("secret", secret),
                ("query", query_text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CdpError::Connection(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CdpError::Connection(e.without_url().to_string()))?;

        let result = parse_response(status, &body)?;

        tracing::debug!(
            status = status.as_u16(),
            total_count = %result.total_count_display(),
            sampled = result.profiles.len(),
            "CDP query succeeded"
        );

        Ok(result)
    }
}

/// Builds the customers URL below `base_url`
fn customers_endpoint(
    base_url: &str,
    business_unit: &str,
    view: &str,
) -> std::result::Result<Url, CdpError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| CdpError::InvalidEndpoint(format!("{base_url}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| CdpError::InvalidEndpoint(format!("{base_url}: cannot be a base URL")))?
        .pop_if_empty()
        .extend([
            "api",
            "businessunits",
            business_unit,
            "views",
            view,
            "customers",
        ]);

    Ok(url)
}

/// Validates a raw customers response
///
/// Anything but 200 is an upstream error; the body must be JSON with a
/// `profiles` array. Other fields, `totalCount` included, pass through, and
/// the entries of `profiles` are never rejected.
fn parse_response(status: StatusCode, body: &str) -> std::result::Result<QueryResult, CdpError> {
    if status != StatusCode::OK {
        return Err(CdpError::Upstream {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| CdpError::Decode {
        body: body.to_string(),
        reason: e.to_string(),
    })?;

    if !value.get("profiles").is_some_and(Value::is_array) {
        return Err(CdpError::Schema(
            "Profiles array not found in response.".to_string(),
        ));
    }

    // Profile content is read leniently, so only the envelope can be rejected
    serde_json::from_value(value)
        .map_err(|e| CdpError::Schema(format!("Unexpected response shape: {e}")))
}
