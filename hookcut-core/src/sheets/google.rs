// ============================================================================
// hookcut-core/src/sheets/google.rs
// ============================================================================
//
// GOOGLE SHEETS CLIENT: SpreadsheetClient over the Sheets v4 REST API
//
// Connecting authenticates with the service account key, opens the
// spreadsheet by id and picks the worksheet: the configured name when it
// exists, otherwise the first worksheet. Reads fetch the whole worksheet as
// formatted values; writes update a single A1 cell. Failures are surfaced
// to the caller as typed errors and never retried.

use super::SpreadsheetClient;
use super::auth::{self, SHEETS_SCOPES, ServiceAccountKey};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use std::time::Duration;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<WorksheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct WorksheetEntry {
    properties: WorksheetProperties,
}

#[derive(Debug, Deserialize)]
struct WorksheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Blocking Sheets v4 client bound to one worksheet.
#[derive(Debug)]
pub struct GoogleSheetsClient {
    http: Client,
    access_token: String,
    sheet_id: String,
    title: String,
    worksheet_name: String,
}

impl GoogleSheetsClient {
    /// Connects using the credentials, sheet id and worksheet in `config`.
    pub fn connect(config: &CoreConfig) -> CoreResult<Self> {
        let sheet_id = config.require_sheet_id()?;
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        Self::connect_with_key(&key, sheet_id, &config.worksheet_name)
    }

    /// Connects with an already loaded key.
    pub fn connect_with_key(
        key: &ServiceAccountKey,
        sheet_id: &str,
        preferred_worksheet: &str,
    ) -> CoreResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("hookcut/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let access_token = auth::fetch_access_token(&http, key, SHEETS_SCOPES)?;
        log::info!("Google Sheets authentication successful");

        let url = format!(
            "{SHEETS_API_BASE}/{}?fields=properties.title,sheets.properties.title",
            urlencoding::encode(sheet_id)
        );
        let response = http.get(&url).bearer_auth(&access_token).send()?;
        let metadata: SpreadsheetMetadata = check_status(response, sheet_id)?.json()?;

        let worksheet_titles: Vec<String> = metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect();
        let worksheet_name = choose_worksheet(&worksheet_titles, preferred_worksheet)
            .ok_or_else(|| {
                CoreError::SheetFormat(format!(
                    "spreadsheet '{}' has no worksheets",
                    metadata.properties.title
                ))
            })?;

        log::info!("Connected to spreadsheet: {}", metadata.properties.title);
        log::info!("Using worksheet: {worksheet_name}");

        Ok(Self {
            http,
            access_token,
            sheet_id: sheet_id.to_string(),
            title: metadata.properties.title,
            worksheet_name,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{SHEETS_API_BASE}/{}/values/{}",
            urlencoding::encode(&self.sheet_id),
            urlencoding::encode(range)
        )
    }
}

impl SpreadsheetClient for GoogleSheetsClient {
    fn title(&self) -> &str {
        &self.title
    }

    fn worksheet_name(&self) -> &str {
        &self.worksheet_name
    }

    fn read_all_rows(&self) -> CoreResult<Vec<Vec<String>>> {
        let range = quote_worksheet(&self.worksheet_name);
        let response = self
            .http
            .get(self.values_url(&range))
            .bearer_auth(&self.access_token)
            .send()?;
        let value_range: ValueRange = check_status(response, &self.sheet_id)?.json()?;

        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    fn write_cell(&self, row: usize, column: usize, value: &str) -> CoreResult<()> {
        let range = a1_cell(&self.worksheet_name, row, column)?;
        log::debug!("Writing '{value}' to {range}");

        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[value]],
        });
        let response = self
            .http
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()?;
        check_status(response, &self.sheet_id)?;
        Ok(())
    }
}

/// Maps HTTP failures onto the sheet error variants.
fn check_status(response: Response, sheet_id: &str) -> CoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let detail = format!("{sheet_id} ({status}): {}", body.trim());
    Err(match status {
        StatusCode::UNAUTHORIZED => CoreError::SheetAuth(detail),
        StatusCode::FORBIDDEN => CoreError::SheetPermissionDenied(detail),
        StatusCode::NOT_FOUND => CoreError::SheetNotFound(detail),
        _ => CoreError::SheetApi(detail),
    })
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Picks the preferred worksheet when present, otherwise the first one.
fn choose_worksheet(titles: &[String], preferred: &str) -> Option<String> {
    titles
        .iter()
        .find(|t| t.as_str() == preferred)
        .or_else(|| titles.first())
        .cloned()
}

/// Quotes a worksheet title for use in A1 notation.
fn quote_worksheet(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Converts a 1-indexed column number to its letter form (1 -> A, 27 -> AA).
fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn a1_cell(worksheet: &str, row: usize, column: usize) -> CoreResult<String> {
    if row == 0 || column == 0 {
        return Err(CoreError::SheetApi(format!(
            "cell coordinates are 1-indexed, got row {row} column {column}"
        )));
    }
    Ok(format!(
        "{}!{}{}",
        quote_worksheet(worksheet),
        column_letters(column),
        row
    ))
}
