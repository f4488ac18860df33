use super::{CellValue, Grid};
use crate::config::{AnswerLayout, RubricLayout};

/// One rubric sheet row, fields picked out by position but not yet coerced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRubricRow {
    /// 1-based sheet row.
    pub row: usize,
    pub section: Option<String>,
    pub prompt: Option<String>,
    pub question: CellValue,
    pub points: CellValue,
}

/// One answer sheet row. `cells` is the whole row so the answer scan can
/// apply its own offsets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawAnswerRow {
    /// 1-based sheet row.
    pub row: usize,
    pub name: Option<String>,
    pub email: Option<String>,
    pub cells: Vec<CellValue>,
}

pub fn extract_rubric_rows(grid: &Grid, layout: &RubricLayout) -> Vec<RawRubricRow> {
    let start = layout.rubric_first_row.saturating_sub(1);
    (start..grid.height())
        .map(|r| RawRubricRow {
            row: r + 1,
            section: grid.get(r, layout.rubric_section_col - 1).as_text(),
            prompt: grid.get(r, layout.rubric_prompt_col - 1).as_text(),
            question: grid.get(r, layout.rubric_question_col - 1).clone(),
            points: grid.get(r, layout.rubric_points_col - 1).clone(),
        })
        .collect()
}

pub fn extract_answer_rows(grid: &Grid, layout: &AnswerLayout) -> Vec<RawAnswerRow> {
    let start = layout.answers_first_row.saturating_sub(1);
    (start..grid.height())
        .map(|r| RawAnswerRow {
            row: r + 1,
            name: grid.get(r, layout.answers_name_col - 1).as_text(),
            email: layout
                .answers_email_col
                .and_then(|c| grid.get(r, c - 1).as_text()),
            cells: grid.row(r).to_vec(),
        })
        .collect()
}
