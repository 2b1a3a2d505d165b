//! IP reputation lookup via the VirusTotal v3 API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const DEFAULT_BASE_URL: &str = "https://www.virustotal.com/api/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Look up an IP address in VirusTotal and summarize its reputation.
///
/// Every failure mode is folded into the returned string so the agent
/// loop sees tool output rather than an error: a missing key, a non-200
/// status, and transport or parse faults all produce descriptive text.
pub struct IpReputation {
    api_key: Option<String>,
    base_url: String,
    http: reqwest::Client,
}

impl IpReputation {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn lookup(&self, ip: &str, api_key: &str) -> anyhow::Result<String> {
        let url = format!("{}/ip_addresses/{}", self.base_url, ip);

        let response = self
            .http
            .get(&url)
            .header("x-apikey", api_key)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Ok(format!(
                "VirusTotal request failed with status {}",
                status.as_u16()
            ));
        }

        let body: Value = response.json().await?;
        let attributes = &body["data"]["attributes"];
        let stats = &attributes["last_analysis_stats"];

        let count = |field: &str| stats[field].as_i64().unwrap_or(0);
        let country = attributes["country"].as_str().unwrap_or("unknown");
        let asn = match attributes["asn"].as_i64() {
            Some(asn) => asn.to_string(),
            None => "unknown".to_string(),
        };
        let owner = attributes["as_owner"].as_str().unwrap_or("unknown");

        Ok(format!(
            "VirusTotal IP Report for {}:\n\
             - Malicious: {}\n\
             - Suspicious: {}\n\
             - Harmless: {}\n\
             - Undetected: {}\n\
             - Country: {}\n\
             - ASN: {}\n\
             - Owner: {}",
            ip,
            count("malicious"),
            count("suspicious"),
            count("harmless"),
            count("undetected"),
            country,
            asn,
            owner,
        ))
    }
}

#[async_trait]
impl Tool for IpReputation {
    fn name(&self) -> &str {
        "virustotal_ip_lookup"
    }

    fn description(&self) -> &str {
        "Check an IP address reputation using VirusTotal"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ip": {
                    "type": "string",
                    "description": "The IP address to look up"
                }
            },
            "required": ["ip"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let ip = args["ip"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'ip' argument"))?;

        let Some(api_key) = self.api_key.as_deref() else {
            return Ok("VirusTotal API key not configured.".to_string());
        };

        match self.lookup(ip, api_key).await {
            Ok(report) => Ok(report),
            Err(e) => Ok(format!("Error querying VirusTotal: {}", e)),
        }
    }
}
