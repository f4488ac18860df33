use super::types::StudentRecord;
use crate::config::{AnswerLayout, AnswerStrategy};
use crate::workbook::{CellValue, RawAnswerRow, EMPTY_CELL};
use tracing::debug;

/// Turns one answer row into a student record. Rows without a name are
/// not students and yield `None`.
pub fn parse_answer_row(raw: &RawAnswerRow, layout: &AnswerLayout) -> Option<StudentRecord> {
    let name = raw.name.as_ref()?;
    Some(StudentRecord {
        name: name.clone(),
        email: raw.email.clone(),
        answers: scan_answers(&raw.cells, layout),
        source_row: raw.row,
    })
}

pub fn parse_answer_rows(rows: &[RawAnswerRow], layout: &AnswerLayout) -> Vec<StudentRecord> {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for raw in rows {
        match parse_answer_row(raw, layout) {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
    }
    debug!(
        "   Parsed {} student rows ({} rows without a name skipped, strategy: {})",
        records.len(),
        skipped,
        layout.answers_strategy
    );
    records
}

/// Reads the 0/1 answer vector from a full sheet row.
///
/// Positions start at `answers_first_col` and advance by `answers_stride`
/// while the column is within both `answers_max_col` and the row. Values
/// other than exactly 0 or 1 are recorded as 0.
pub fn scan_answers(cells: &[CellValue], layout: &AnswerLayout) -> Vec<u8> {
    let start = layout.answers_first_col.saturating_sub(1);
    let end = layout.answers_max_col.min(cells.len());
    let stride = layout.answers_stride.max(1);

    let cell = |i: usize| cells.get(i).unwrap_or(&EMPTY_CELL);

    let mut answers = Vec::new();
    let mut col = start;
    while col < end {
        let primary = cell(col);
        match layout.answers_strategy {
            AnswerStrategy::DualCell => {
                let fallback = cell(col + 1);
                let value = if !primary.is_blank() {
                    normalize_answer(primary)
                } else if !fallback.is_blank() {
                    normalize_answer(fallback)
                } else {
                    0
                };
                answers.push(value);
            }
            AnswerStrategy::StopOnBlank => {
                if primary.is_blank() {
                    break;
                }
                answers.push(normalize_answer(primary));
            }
        }
        col += stride;
    }
    answers
}

/// 1 only for a value that is exactly one; everything else is incorrect.
pub fn normalize_answer(cell: &CellValue) -> u8 {
    match coerce_int(cell) {
        Some(1) => 1,
        _ => 0,
    }
}

fn coerce_int(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
        CellValue::Text(s) => s.trim().parse::<i64>().ok(),
        CellValue::Bool(b) => Some(*b as i64),
        _ => None,
    }
}
