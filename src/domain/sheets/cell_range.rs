use super::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    pub fn new(start: impl Into<CellPosition>, end: impl Into<CellPosition>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            sheet_title: None,
        }
    }

    pub fn with_sheet_title(&self, sheet_title: impl Into<String>) -> Self {
        Self {
            start: self.start,
            end: self.end,
            sheet_title: Some(sheet_title.into()),
        }
    }

    /// A1 notation qualified with the range's own sheet title, if any
    pub fn to_qualified_a1_notation(&self) -> A1Notation {
        self.to_a1_notation(self.sheet_title.as_deref())
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let start = self.start.to_a1_notation(None);
        let end = self.end.to_a1_notation(None);

        match sheet_name {
            Some(sheet_name) => A1Notation(format!(
                "'{}'!{}:{}",
                sheet_name.trim_start_matches('\'').trim_end_matches('\''),
                start,
                end
            )),
            None => A1Notation(format!("{}:{}", start, end)),
        }
    }
}
