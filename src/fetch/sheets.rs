// src/fetch/sheets.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

const MAX_RETRIES: u32 = 3;
const BACKOFF_MS: u64 = 500;

/// How the values request authenticates against the Sheets API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// `?key=...` query parameter; enough for link-shared sheets.
    ApiKey(String),
    /// `Authorization: Bearer ...`, e.g. from `gcloud auth print-access-token`.
    BearerToken(String),
}

/// `spreadsheets.values.get` response body.
///
/// Cells arrive as formatted strings; the API omits trailing blank cells, so
/// rows come back ragged and the parser has to treat them as short rows.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Build the `values.get` endpoint for one worksheet of one spreadsheet.
fn values_url(spreadsheet_id: &str, worksheet: &str, auth: &Auth) -> Result<Url> {
    let mut url = Url::parse(SHEETS_API_BASE)?
        .join(&format!("{}/values/{}", spreadsheet_id, worksheet))
        .with_context(|| format!("building values URL for {}", spreadsheet_id))?;
    if let Auth::ApiKey(key) = auth {
        url.query_pairs_mut().append_pair("key", key);
    }
    Ok(url)
}

async fn get_values_once(client: &Client, url: &Url, auth: &Auth) -> Result<Vec<Vec<String>>> {
    let mut req = client.get(url.clone());
    if let Auth::BearerToken(token) = auth {
        req = req.bearer_auth(token);
    }
    let body: ValueRange = req
        .send()
        .await
        .context("values request failed")?
        .error_for_status()
        .context("non-success status from the Sheets API")?
        .json()
        .await
        .context("decoding values response")?;
    Ok(body.values)
}

/// Fetch every row of `worksheet`, retrying transient failures with
/// exponential backoff. Exhausted retries abort the run; a partial table is
/// worse than no table.
pub async fn fetch_rows(
    client: &Client,
    spreadsheet_id: &str,
    worksheet: &str,
    auth: &Auth,
) -> Result<Vec<Vec<String>>> {
    let url = values_url(spreadsheet_id, worksheet, auth)?;
    debug!(spreadsheet_id, worksheet, "fetching worksheet values");

    let mut attempts = 0;
    loop {
        match get_values_once(client, &url, auth).await {
            Ok(rows) => {
                if rows.is_empty() {
                    warn!(worksheet, "worksheet returned no rows");
                }
                return Ok(rows);
            }
            Err(e) if attempts < MAX_RETRIES => {
                attempts += 1;
                let backoff = BACKOFF_MS * 2u64.pow(attempts - 1);
                warn!(attempt = attempts, delay_ms = backoff, error = %e, "retrying values fetch");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => {
                error!(worksheet, error = %e, "exhausted retries fetching worksheet");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_values_response() {
        let body = r#"{
            "range": "CompositionTables!A1:F100",
            "majorDimension": "ROWS",
            "values": [
                ["ClimateType::Arid"],
                ["GeographicType::Hills", "", "GeographicType::Plains"],
                ["30", "Rocky", "70", "Flat"]
            ]
        }"#;
        let decoded: ValueRange = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.values.len(), 3);
        assert_eq!(decoded.values[2][1], "Rocky");
    }

    #[test]
    fn missing_values_field_means_no_rows() {
        // an empty worksheet omits "values" entirely
        let decoded: ValueRange = serde_json::from_str(r#"{"range": "Empty!A1"}"#).unwrap();
        assert!(decoded.values.is_empty());
    }

    #[test]
    fn api_key_lands_in_the_query_string() {
        let url = values_url("sheet123", "CompositionTables", &Auth::ApiKey("k-9".into())).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/CompositionTables?key=k-9"
        );
    }

    #[test]
    fn bearer_auth_leaves_the_url_alone() {
        let url = values_url("sheet123", "Tables", &Auth::BearerToken("t".into())).unwrap();
        assert!(url.query().is_none());
    }
}
