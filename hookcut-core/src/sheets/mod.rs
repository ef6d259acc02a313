// ============================================================================
// hookcut-core/src/sheets/mod.rs
// ============================================================================
//
// CAPTION STORE: Remote Spreadsheet Access
//
// The captions live in a Google Sheet with four columns: `used?`,
// `mentions toffee?`, `type` and `overlay text`. This module defines the
// SpreadsheetClient trait the rest of the crate talks to, the parsed row
// model, and the header validation run before any video is processed.
//
// KEY COMPONENTS:
// - SpreadsheetClient: read all rows / write one cell
// - CaptionTable / CaptionRow: header-aware view over the raw cell grid
// - SheetStatistics: per-type availability summary
// - GoogleSheetsClient: the Sheets v4 implementation
//
// There is no local cache and no locking: every read and write goes to the
// live sheet, so two concurrent runs can race on the same row.

mod auth;
mod google;
#[cfg(feature = "test-mocks")]
pub mod mocks;

pub use auth::ServiceAccountKey;
pub use google::GoogleSheetsClient;

use crate::error::{CoreError, CoreResult};

/// Headers the caption sheet must carry, compared after trimming and lowercasing.
pub const EXPECTED_HEADERS: [&str; 4] = ["used?", "mentions toffee?", "type", "overlay text"];

const HEADER_USED: &str = "used?";
const HEADER_MENTIONS: &str = "mentions toffee?";
const HEADER_TYPE: &str = "type";
const HEADER_TEXT: &str = "overlay text";

/// Access to one worksheet of a remote spreadsheet.
pub trait SpreadsheetClient {
    /// Title of the spreadsheet, for display.
    fn title(&self) -> &str;

    /// Title of the worksheet in use.
    fn worksheet_name(&self) -> &str;

    /// Returns every row of the worksheet in order, header row included.
    fn read_all_rows(&self) -> CoreResult<Vec<Vec<String>>>;

    /// Writes `value` into the cell at `row`/`column` (both 1-indexed).
    fn write_cell(&self, row: usize, column: usize, value: &str) -> CoreResult<()>;
}

/// Normalizes a header or cell for comparison.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Interprets a sheet checkbox / boolean cell. Only a literal `TRUE`
/// (case-insensitive) counts as true.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("TRUE")
}

/// One caption record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRow {
    /// 1-indexed row number in the sheet (the header occupies row 1).
    pub row_number: usize,
    pub used: bool,
    pub mentions_flag: bool,
    pub video_type: String,
    pub text: String,
    /// Raw `used?` cell, kept so selection can apply its own normalization.
    pub used_raw: String,
}

/// Header-aware view over the raw cell grid of the caption sheet.
#[derive(Debug, Clone)]
pub struct CaptionTable {
    pub headers: Vec<String>,
    /// 1-indexed column holding the `used?` flag.
    pub used_column: usize,
    pub rows: Vec<CaptionRow>,
}

impl CaptionTable {
    /// Parses the raw grid returned by [`SpreadsheetClient::read_all_rows`].
    ///
    /// Fails with `SheetFormat` when the sheet has no data rows or when its
    /// headers are not exactly the expected four (order-independent).
    pub fn from_rows(grid: &[Vec<String>]) -> CoreResult<Self> {
        let (header_row, data) = grid.split_first().ok_or_else(|| {
            CoreError::SheetFormat("sheet is empty; add a header row and data".to_string())
        })?;

        let headers: Vec<String> = header_row.clone();
        validate_headers(&headers)?;

        if data.iter().all(|row| row.iter().all(|c| c.trim().is_empty())) {
            return Err(CoreError::SheetFormat(
                "sheet has no data rows".to_string(),
            ));
        }

        let column_of = |name: &str| -> CoreResult<usize> {
            headers
                .iter()
                .position(|h| normalize(h) == name)
                .ok_or_else(|| CoreError::SheetFormat(format!("missing column '{name}'")))
        };
        let used_col = column_of(HEADER_USED)?;
        let mentions_col = column_of(HEADER_MENTIONS)?;
        let type_col = column_of(HEADER_TYPE)?;
        let text_col = column_of(HEADER_TEXT)?;

        let cell = |row: &[String], idx: usize| -> String {
            row.get(idx).cloned().unwrap_or_default()
        };

        let rows = data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row = row.as_slice();
                let used_raw = cell(row, used_col);
                CaptionRow {
                    row_number: i + 2,
                    used: parse_flag(&used_raw),
                    mentions_flag: parse_flag(&cell(row, mentions_col)),
                    video_type: cell(row, type_col).trim().to_string(),
                    text: cell(row, text_col).trim().to_string(),
                    used_raw,
                }
            })
            .collect();

        Ok(Self {
            headers,
            used_column: used_col + 1,
            rows,
        })
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Checks that the header row holds exactly [`EXPECTED_HEADERS`], in any
/// order. Blank and repeated header cells are rejected.
pub fn validate_headers(headers: &[String]) -> CoreResult<()> {
    let mut found: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    found.sort();

    let mut expected: Vec<String> = EXPECTED_HEADERS.iter().map(|h| normalize(h)).collect();
    expected.sort();

    if found != expected {
        return Err(CoreError::SheetFormat(format!(
            "headers incorrect. Expected: {:?}, found: {:?}",
            EXPECTED_HEADERS, headers
        )));
    }
    Ok(())
}

/// Reads the sheet and validates its layout. Returns the number of data rows.
pub fn check_sheet_format<C: SpreadsheetClient + ?Sized>(client: &C) -> CoreResult<usize> {
    let grid = client.read_all_rows()?;
    let table = CaptionTable::from_rows(&grid)?;
    log::info!("Google Sheet format validated ({} data rows)", table.len());
    Ok(table.len())
}

/// Availability counts for one caption type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeStats {
    pub video_type: String,
    pub total: usize,
    pub used: usize,
    pub available: usize,
}

/// Per-type availability summary of the caption sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetStatistics {
    /// Types in order of first appearance; rows with a blank type are skipped.
    pub types: Vec<TypeStats>,
}

impl SheetStatistics {
    #[must_use]
    pub fn from_table(table: &CaptionTable) -> Self {
        let mut types: Vec<TypeStats> = Vec::new();
        for row in &table.rows {
            if row.video_type.is_empty() {
                continue;
            }
            let idx = match types.iter().position(|t| t.video_type == row.video_type) {
                Some(idx) => idx,
                None => {
                    types.push(TypeStats {
                        video_type: row.video_type.clone(),
                        ..Default::default()
                    });
                    types.len() - 1
                }
            };
            let stats = &mut types[idx];
            stats.total += 1;
            if row.used {
                stats.used += 1;
            } else {
                stats.available += 1;
            }
        }
        Self { types }
    }

    /// Reads the sheet and computes statistics.
    pub fn collect<C: SpreadsheetClient + ?Sized>(client: &C) -> CoreResult<Self> {
        let grid = client.read_all_rows()?;
        Ok(Self::from_table(&CaptionTable::from_rows(&grid)?))
    }

    /// Unused rows for a type (case-insensitive), zero when the type is absent.
    #[must_use]
    pub fn available_for(&self, video_type: &str) -> usize {
        self.types
            .iter()
            .filter(|t| t.video_type.eq_ignore_ascii_case(video_type))
            .map(|t| t.available)
            .sum()
    }
}
