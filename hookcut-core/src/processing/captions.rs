//! Caption selection.
//!
//! Picks the first unused caption of a type and marks it used in the sheet.

use crate::error::CoreResult;
use crate::sheets::{CaptionTable, SpreadsheetClient};
use crate::video_type::VideoType;

/// A caption taken from the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCaption {
    /// Sheet row that was marked used.
    pub row_number: usize,
    pub text: String,
}

/// Finds the first row whose type matches `video_type` and whose `used?`
/// cell reads `FALSE`, marks it `TRUE` and returns its text. The flag is
/// written to whichever column carries the `used?` header.
///
/// Returns `Ok(None)` when no such row exists; nothing is written then.
/// The read and the write are separate requests, so a concurrent writer can
/// take the same row.
pub fn select_and_consume<C: SpreadsheetClient + ?Sized>(
    client: &C,
    video_type: VideoType,
) -> CoreResult<Option<SelectedCaption>> {
    let grid = client.read_all_rows()?;
    let table = CaptionTable::from_rows(&grid)?;

    let Some(row) = table.rows.iter().find(|row| {
        row.video_type.eq_ignore_ascii_case(video_type.keyword())
            && row.used_raw.trim().eq_ignore_ascii_case("FALSE")
    }) else {
        log::info!("No unused overlay text found for type '{video_type}'");
        return Ok(None);
    };

    client.write_cell(row.row_number, table.used_column, "TRUE")?;
    log::info!("Found overlay text for type '{video_type}'");
    log::info!("Text: {}", row.text);
    log::debug!("Marked row {} as used in the caption sheet", row.row_number);

    Ok(Some(SelectedCaption {
        row_number: row.row_number,
        text: row.text.clone(),
    }))
}
