use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        AddSheetRequest, BatchUpdateSpreadsheetRequest, BatchUpdateValuesRequest,
        DeleteSheetRequest, Request, Response as Reply, Scope, SheetProperties, Spreadsheet,
        SpreadsheetProperties, ValueRange,
    },
    Sheets,
};
use tracing::instrument;

use crate::{
    domain::sheets::score_sheet::SheetBlock,
    ports::spreadsheet_service::{
        SheetRequest, SheetSummary, SpreadsheetService, SpreadsheetServiceError,
    },
};

use super::{
    auth::GoogleAuthenticator,
    http_client::{HttpClient, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};

pub struct SpreadsheetManager {
    hub: Sheets<HttpsConnector>,
}

impl std::fmt::Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager")
    }
}

impl SpreadsheetManager {
    pub fn new(client: HttpClient, auth: GoogleAuthenticator) -> Self {
        Self {
            hub: Sheets::new(client, auth),
        }
    }
}

fn to_api_request(request: SheetRequest) -> Request {
    match request {
        SheetRequest::AddSheet { title, index } => Request {
            add_sheet: Some(AddSheetRequest {
                properties: Some(SheetProperties {
                    title: Some(title),
                    index: index.map(|index| index as i32),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        },
        SheetRequest::DeleteSheet { sheet_id } => Request {
            delete_sheet: Some(DeleteSheetRequest {
                sheet_id: Some(sheet_id),
            }),
            ..Default::default()
        },
    }
}

fn added_sheet_id(reply: Reply) -> Option<i32> {
    reply
        .add_sheet
        .and_then(|added| added.properties)
        .and_then(|properties| properties.sheet_id)
}

#[async_trait::async_trait]
impl SpreadsheetService for SpreadsheetManager {
    #[instrument]
    async fn create_spreadsheet(
        &self,
        title: &str,
    ) -> error_stack::Result<String, SpreadsheetServiceError> {
        let spreadsheet = Spreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(title.to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .create(spreadsheet)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetServiceError::FailedToCreateSpreadsheet)?;

        spreadsheet
            .spreadsheet_id
            .ok_or(report!(SpreadsheetServiceError::MissingField(
                "spreadsheet id"
            )))
    }

    #[instrument]
    async fn list_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<Vec<SheetSummary>, SpreadsheetServiceError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetServiceError::FailedToFetchSpreadsheet)
            .attach_printable_lazy(|| format!("Spreadsheet: {}", spreadsheet_id))?;

        spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .map(|sheet| {
                let properties = sheet
                    .properties
                    .ok_or(report!(SpreadsheetServiceError::MissingField(
                        "sheet properties"
                    )))?;
                Ok(SheetSummary {
                    sheet_id: properties
                        .sheet_id
                        .ok_or(report!(SpreadsheetServiceError::MissingField("sheet id")))?,
                    title: properties.title.unwrap_or_default(),
                })
            })
            .collect()
    }

    #[instrument(skip(requests), fields(requests = requests.len()))]
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<SheetRequest>,
    ) -> error_stack::Result<Vec<Option<i32>>, SpreadsheetServiceError> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(requests.into_iter().map(to_api_request).collect()),
            ..Default::default()
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .batch_update(request, spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetServiceError::FailedToUpdateSpreadsheet)
            .attach_printable_lazy(|| format!("Spreadsheet: {}", spreadsheet_id))?;

        Ok(response
            .replies
            .unwrap_or_default()
            .into_iter()
            .map(added_sheet_id)
            .collect())
    }

    #[instrument(skip(blocks), fields(blocks = blocks.len()))]
    async fn write_blocks(
        &self,
        spreadsheet_id: &str,
        blocks: &[SheetBlock],
    ) -> error_stack::Result<(), SpreadsheetServiceError> {
        let request = BatchUpdateValuesRequest {
            data: Some(blocks.iter().map(ValueRange::from_block).collect()),
            value_input_option: Some("USER_ENTERED".to_string()),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .values_batch_update(request, spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetServiceError::FailedToWriteValues)
            .attach_printable_lazy(|| format!("Spreadsheet: {}", spreadsheet_id))?;

        Ok(())
    }
}
