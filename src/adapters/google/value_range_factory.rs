use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::sheets::score_sheet::{CellValue, SheetBlock};

pub trait ValueRangeFactory {
    fn from_block(block: &SheetBlock) -> Self;
}

fn cell_to_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(text) => Value::String(text.clone()),
        CellValue::Number(number) => Value::from(*number),
    }
}

fn rows_to_values(rows: &[Vec<CellValue>]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect()
}

impl ValueRangeFactory for ValueRange {
    fn from_block(block: &SheetBlock) -> Self {
        Self {
            major_dimension: Some("ROWS".to_string()),
            range: Some(block.range.to_qualified_a1_notation().into()),
            values: Some(rows_to_values(&block.rows)),
        }
    }
}
