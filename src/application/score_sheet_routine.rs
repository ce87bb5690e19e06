use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{
        entry::Entry,
        sheets::score_sheet::{sheet_names, ScoreSheetFormulas},
    },
    ports::{
        routine::{Routine, RoutineError},
        spreadsheet_service::{SheetRequest, SpreadsheetService},
    },
};

#[derive(Error, Debug)]
enum ScoreSheetRoutineError {
    #[error("failed to execute spreadsheet operation")]
    SpreadsheetError,
    #[error("new spreadsheet has no default sheet")]
    MissingDefaultSheet,
}

pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}", spreadsheet_id)
}

/// Builds the score sheet: Guess, Total and Round tabs with their formulas.
pub struct ScoreSheetRoutine {
    service: Arc<dyn SpreadsheetService>,
    title: String,
    entries: Arc<[Entry]>,
    host: Option<String>,
}

impl std::fmt::Debug for ScoreSheetRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreSheetRoutine")
            .field("title", &self.title)
            .field("entries", &self.entries.len())
            .field("host", &self.host)
            .finish()
    }
}

impl ScoreSheetRoutine {
    pub fn new(
        service: Arc<dyn SpreadsheetService>,
        title: String,
        entries: Arc<[Entry]>,
        host: Option<String>,
    ) -> Self {
        Self {
            service,
            title,
            entries,
            host,
        }
    }

    /// Adds the quiz tabs and drops the default sheet a new spreadsheet has.
    #[instrument]
    async fn create_quiz_sheets(
        &self,
        spreadsheet_id: &str,
    ) -> error_stack::Result<(), ScoreSheetRoutineError> {
        let default_sheet = self
            .service
            .list_sheets(spreadsheet_id)
            .await
            .change_context(ScoreSheetRoutineError::SpreadsheetError)?
            .into_iter()
            .next()
            .ok_or(report!(ScoreSheetRoutineError::MissingDefaultSheet))?;

        let mut requests: Vec<SheetRequest> = sheet_names::ALL
            .iter()
            .map(|title| SheetRequest::AddSheet {
                title: (*title).to_owned(),
                index: None,
            })
            .collect();
        requests.push(SheetRequest::DeleteSheet {
            sheet_id: default_sheet.sheet_id,
        });

        self.service
            .batch_update(spreadsheet_id, requests)
            .await
            .change_context(ScoreSheetRoutineError::SpreadsheetError)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Routine for ScoreSheetRoutine {
    fn name(&self) -> &'static str {
        "ScoreSheetRoutine"
    }

    #[instrument(skip(self), name = "ScoreSheetRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        let formulas = ScoreSheetFormulas::generate(&self.entries, self.host.as_deref())
            .change_context(RoutineError::routine_failure("Failed to generate formulas"))?;
        tracing::debug!(
            "{} players, {} counted for scoring",
            formulas.players.len(),
            formulas.effective_player_count
        );

        tracing::info!("Spreadsheet: 📊 Creating spreadsheet '{}'", self.title);
        let spreadsheet_id = self
            .service
            .create_spreadsheet(&self.title)
            .await
            .change_context(RoutineError::routine_failure("Failed to create spreadsheet"))?;

        self.create_quiz_sheets(&spreadsheet_id)
            .await
            .change_context(RoutineError::routine_failure("Failed to create quiz sheets"))?;

        tracing::info!("Spreadsheet: 📝 Writing score formulas");
        self.service
            .write_blocks(&spreadsheet_id, &formulas.blocks)
            .await
            .change_context(RoutineError::routine_failure("Failed to write formulas"))?;

        tracing::info!("Spreadsheet URL: {}", spreadsheet_url(&spreadsheet_id));
        Ok(())
    }
}
