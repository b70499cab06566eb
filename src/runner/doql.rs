use crate::config::ConnectionConfig;
use crate::error::DoqlError;
use crate::normalize;
use crate::runner::{QueryResult, QueryRunner, Row, SchemaEntry, SchemaMap};
use crate::sanitize;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::OnceLock;

/// Fixed introspection query; yields one row per (table, column) pair.
pub const TABLES_QUERY: &str = "SELECT table_schema, table_name, column_name \
     FROM information_schema.columns \
     WHERE table_schema NOT IN ('pg_catalog', 'information_schema');";

static TRANSPORT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Whether the HTTP/TLS stack can be brought up in this process. Probed once
/// on first use; hosts check the result before dispatching any operation.
pub fn transport_available() -> bool {
    *TRANSPORT_AVAILABLE.get_or_init(|| build_client(true).is_ok())
}

/// Transport client for the appliance. Certificate validation is off while
/// `trust_server_certificate` is set (the default); appliances ship
/// self-signed certificates. Redirects follow reqwest's default policy and
/// no request timeout is applied.
fn build_client(trust_server_certificate: bool) -> Result<Client, DoqlError> {
    Client::builder()
        .danger_accept_invalid_certs(trust_server_certificate)
        .build()
        .map_err(|e| DoqlError::Transport {
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// Basic auth header value for the given credentials.
pub fn basic_auth(user: &str, passwd: &str) -> String {
    let credentials = format!("{}:{}", user, passwd);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Query runner for the Device42 DOQL endpoint.
pub struct DoqlRunner {
    config: ConnectionConfig,
    client: Client,
}

impl DoqlRunner {
    pub fn new(config: ConnectionConfig) -> Result<Self, DoqlError> {
        let client = build_client(config.trust_server_certificate)?;
        Ok(DoqlRunner { config, client })
    }

    /// Endpoint URL for `query`. The query text is embedded as given; the
    /// URL layer only escapes what HTTP itself cannot carry.
    pub fn query_url(&self, query: &str) -> String {
        format!(
            "https://{}/services/data/v1.0/query/?query={}&header=yes",
            self.config.host, query
        )
    }

    fn auth_header(&self) -> String {
        basic_auth(&self.config.user, self.config.passwd.expose_secret())
    }

    /// One GET round trip; returns the body text for 2xx statuses.
    async fn fetch(&self, query: &str) -> Result<String, DoqlError> {
        let url = self.query_url(query);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| DoqlError::Transport {
                message: format!("request failed: {}", e),
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| DoqlError::Transport {
            message: format!("failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            let detail = body.trim();
            let message = if detail.is_empty() {
                format!("HTTP error: {}", status)
            } else {
                format!("HTTP error: {}: {}", status, detail)
            };
            return Err(DoqlError::Transport { message });
        }

        Ok(body)
    }
}

impl QueryRunner for DoqlRunner {
    fn runner_type(&self) -> &'static str {
        "doql"
    }

    fn display_name(&self) -> &'static str {
        "DOQL"
    }

    fn enabled(&self) -> bool {
        transport_available()
    }

    async fn run_query(&self, query: &str, _user: Option<&str>) -> Result<QueryResult, DoqlError> {
        let stripped = sanitize::strip_comment_prefix(query);
        let payload = self.fetch(stripped).await?;
        // The probe check runs against the query as submitted, so an
        // annotated probe is treated as an ordinary query.
        normalize::normalize(query, &payload)
    }

    async fn get_tables(&self, schema: &mut SchemaMap) -> Result<Vec<SchemaEntry>, DoqlError> {
        let result = self
            .run_query(TABLES_QUERY, None)
            .await
            .map_err(|e| DoqlError::SchemaFetch(Box::new(e)))?;

        collect_schema(&result, schema)?;
        Ok(schema.entries().to_vec())
    }
}

/// Fold introspection rows into the accumulator: first sight of a table
/// creates its entry, every row appends its column name.
pub fn collect_schema(result: &QueryResult, schema: &mut SchemaMap) -> Result<(), DoqlError> {
    for row in &result.rows {
        let table = introspection_field(row, "table_name")?;
        let column = introspection_field(row, "column_name")?;
        schema.add_column(table, column);
    }
    Ok(())
}

fn introspection_field<'a>(row: &'a Row, key: &str) -> Result<&'a str, DoqlError> {
    row.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DoqlError::Decode {
            message: format!("introspection row missing {}", key),
        })
}
