use thiserror::Error;

use crate::domain::sheets::score_sheet::SheetBlock;

#[derive(Error, Debug)]
pub enum SpreadsheetServiceError {
    #[error("failed to create spreadsheet")]
    FailedToCreateSpreadsheet,
    #[error("failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("failed to update spreadsheet")]
    FailedToUpdateSpreadsheet,
    #[error("failed to write values")]
    FailedToWriteValues,
    #[error("spreadsheet response is missing {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRequest {
    AddSheet { title: String, index: Option<u32> },
    DeleteSheet { sheet_id: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub sheet_id: i32,
    pub title: String,
}

#[async_trait::async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Returns the new spreadsheet id
    async fn create_spreadsheet(
        &self,
        title: &str,
    ) -> error_stack::Result<String, SpreadsheetServiceError>;

    /// Sheets in tab order
    async fn list_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<Vec<SheetSummary>, SpreadsheetServiceError>;

    /// Returns, per request, the id of the sheet it added, if any
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<SheetRequest>,
    ) -> error_stack::Result<Vec<Option<i32>>, SpreadsheetServiceError>;

    /// Writes every block in one call, evaluating formulas as if typed by a user
    async fn write_blocks(
        &self,
        spreadsheet_id: &str,
        blocks: &[SheetBlock],
    ) -> error_stack::Result<(), SpreadsheetServiceError>;
}
