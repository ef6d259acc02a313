// hookcut-core/src/sheets/mocks.rs

// --- In-memory caption sheet (for testing) ---

use super::SpreadsheetClient;
use crate::error::{CoreError, CoreResult};
use std::cell::RefCell;
use std::rc::Rc;

/// A cell write recorded by [`InMemorySheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: usize,
    pub column: usize,
    pub value: String,
}

/// SpreadsheetClient backed by a grid in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheet {
    grid: Rc<RefCell<Vec<Vec<String>>>>,
    writes: Rc<RefCell<Vec<CellWrite>>>,
    fail_reads: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<Option<String>>>,
}

impl InMemorySheet {
    /// Creates a sheet with the standard header row and no data.
    pub fn new() -> Self {
        Self::from_grid(vec![
            super::EXPECTED_HEADERS
                .iter()
                .map(|h| (*h).to_string())
                .collect(),
        ])
    }

    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        Self {
            grid: Rc::new(RefCell::new(grid)),
            ..Default::default()
        }
    }

    /// Appends a caption row in the standard column order.
    pub fn with_caption(self, used: bool, video_type: &str, text: &str) -> Self {
        self.grid.borrow_mut().push(vec![
            if used { "TRUE" } else { "FALSE" }.to_string(),
            "FALSE".to_string(),
            video_type.to_string(),
            text.to_string(),
        ]);
        self
    }

    /// Makes every subsequent read fail with a `SheetApi` error.
    pub fn fail_reads(&self, message: &str) {
        *self.fail_reads.borrow_mut() = Some(message.to_string());
    }

    /// Makes every subsequent write fail with a `SheetApi` error.
    pub fn fail_writes(&self, message: &str) {
        *self.fail_writes.borrow_mut() = Some(message.to_string());
    }

    pub fn writes(&self) -> Vec<CellWrite> {
        self.writes.borrow().clone()
    }

    /// Returns the value of a cell (1-indexed), empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> String {
        self.grid
            .borrow()
            .get(row.saturating_sub(1))
            .and_then(|r| r.get(column.saturating_sub(1)))
            .cloned()
            .unwrap_or_default()
    }
}

impl SpreadsheetClient for InMemorySheet {
    fn title(&self) -> &str {
        "In-memory captions"
    }

    fn worksheet_name(&self) -> &str {
        "Sheet1"
    }

    fn read_all_rows(&self) -> CoreResult<Vec<Vec<String>>> {
        if let Some(msg) = self.fail_reads.borrow().as_ref() {
            return Err(CoreError::SheetApi(msg.clone()));
        }
        Ok(self.grid.borrow().clone())
    }

    fn write_cell(&self, row: usize, column: usize, value: &str) -> CoreResult<()> {
        if let Some(msg) = self.fail_writes.borrow().as_ref() {
            return Err(CoreError::SheetApi(msg.clone()));
        }
        if row == 0 || column == 0 {
            return Err(CoreError::SheetApi(format!(
                "invalid cell {row},{column}"
            )));
        }

        let mut grid = self.grid.borrow_mut();
        while grid.len() < row {
            grid.push(Vec::new());
        }
        let target = &mut grid[row - 1];
        while target.len() < column {
            target.push(String::new());
        }
        target[column - 1] = value.to_string();

        self.writes.borrow_mut().push(CellWrite {
            row,
            column,
            value: value.to_string(),
        });
        Ok(())
    }
}
