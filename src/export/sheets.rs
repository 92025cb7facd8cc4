use super::auth::{fetch_access_token, ServiceAccountKey};
use super::RowSink;
use crate::error::{GraderError, Result};
use crate::types::config::SheetsConfig;
use crate::types::row::ResultRow;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use tracing::{debug, info};

pub struct SheetsExporter {
    http: reqwest::Client,
    config: SheetsConfig,
    key: ServiceAccountKey,
}

impl SheetsExporter {
    pub fn new(config: SheetsConfig, key: ServiceAccountKey) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("grader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config, key })
    }

    pub fn append_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| {
            GraderError::ConfigParse(format!(
                "sheets.api_base is not a valid URL ({}): {e}",
                self.config.api_base
            ))
        })?;
        let append_segment = format!("{}:append", self.config.range);
        url.path_segments_mut()
            .map_err(|_| {
                GraderError::ConfigParse(format!(
                    "sheets.api_base cannot carry a path: {}",
                    self.config.api_base
                ))
            })?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                append_segment.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", &self.config.value_input_option)
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }
}

#[async_trait]
impl RowSink for SheetsExporter {
    async fn append(&self, row: &ResultRow) -> Result<()> {
        let url = self.append_url()?;
        let token = fetch_access_token(&self.http, &self.key, &self.config.scope).await?;

        debug!(
            spreadsheet = %self.config.spreadsheet_id,
            range = %self.config.range,
            "appending row"
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraderError::Export {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let updated_range = body
            .pointer("/updates/updatedRange")
            .and_then(|value| value.as_str())
            .unwrap_or("unknown");
        info!(updated_range, "row appended");
        Ok(())
    }
}
