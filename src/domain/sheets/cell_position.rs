use super::{
    a1_notation::{A1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub fn new(col: impl Into<Column>, row: impl Into<Row>) -> Self {
        CellPosition {
            col: col.into(),
            row: row.into(),
        }
    }
}

impl<C: Into<Column>, R: Into<Row>> From<(C, R)> for CellPosition {
    fn from((col, row): (C, R)) -> Self {
        CellPosition::new(col, row)
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        match sheet_name {
            Some(sheet_name) => A1Notation(format!("'{}'!{}{}", sheet_name, self.col, self.row)),
            None => A1Notation(format!("{}{}", self.col, self.row)),
        }
    }
}
