use super::ReportFormats;
use crate::config::Config;
use crate::error::SfResult;
use crate::pipeline::RunOutput;
use crate::workbook::Grid;
use rust_xlsxwriter::utility::column_number_to_name;
use rust_xlsxwriter::Worksheet;

const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;
const COLUMN_WIDTH: f64 = 20.0;

/// Cross-student raw score table: one row per student, one column per
/// section, the truncated total last, and an average row of formulas.
pub fn write_summary(ws: &mut Worksheet, result: &RunOutput, formats: &ReportFormats) -> SfResult<()> {
    let labels: Vec<&str> = result.rubric.sections.iter().map(|s| s.label.as_str()).collect();
    write_headers(ws, &labels, "総合得点（満点）", formats)?;

    for (i, student) in result.students.iter().enumerate() {
        let row = FIRST_DATA_ROW + i as u32;
        ws.write_string_with_format(row, 0, &student.name, &formats.text)?;
        for (c, s) in student.section_scores.iter().enumerate() {
            ws.write_number_with_format(row, c as u16 + 1, s.score, &formats.number)?;
        }
        let total_col = labels.len() as u16 + 1;
        ws.write_number_with_format(row, total_col, student.total_score.trunc(), &formats.integer)?;
    }

    write_average_row(ws, result.students.len(), labels.len() + 1, formats)
}

/// Cross-student 5-point table: section ratings plus each student's mean
/// rating, and an average row of formulas.
pub fn write_ratings(ws: &mut Worksheet, result: &RunOutput, formats: &ReportFormats) -> SfResult<()> {
    let labels: Vec<&str> = result.rubric.sections.iter().map(|s| s.label.as_str()).collect();
    write_headers(ws, &labels, "総合評価（5点満点）", formats)?;

    for (i, student) in result.students.iter().enumerate() {
        let row = FIRST_DATA_ROW + i as u32;
        ws.write_string_with_format(row, 0, &student.name, &formats.text)?;
        for (c, s) in student.section_scores.iter().enumerate() {
            ws.write_number_with_format(row, c as u16 + 1, s.rating(), &formats.rating)?;
        }
        let avg_col = labels.len() as u16 + 1;
        ws.write_number_with_format(row, avg_col, student.average_section_rating(), &formats.rating)?;
    }

    write_average_row(ws, result.students.len(), labels.len() + 1, formats)
}

/// Adds one column per section to the answer sheet, after a blank gap
/// column, holding each student's raw section score on their own row.
pub fn append_section_scores(
    ws: &mut Worksheet,
    grid: &Grid,
    result: &RunOutput,
    config: &Config,
    formats: &ReportFormats,
) -> SfResult<()> {
    let start_col = grid.width() + 1;

    // Header goes on the row just above the data; with data from row 1 there is none.
    if let Some(header_row) = config.answers.answers_first_row.checked_sub(2) {
        for (i, section) in result.rubric.sections.iter().enumerate() {
            ws.write_string_with_format(
                header_row as u32,
                (start_col + i) as u16,
                &section.label,
                &formats.header,
            )?;
        }
    }
    for student in &result.students {
        let row = student.source_row.saturating_sub(1) as u32;
        for (i, s) in student.section_scores.iter().enumerate() {
            ws.write_number(row, (start_col + i) as u16, s.score)?;
        }
    }
    Ok(())
}

fn write_headers(
    ws: &mut Worksheet,
    labels: &[&str],
    last: &str,
    formats: &ReportFormats,
) -> SfResult<()> {
    let headers = std::iter::once("氏名")
        .chain(labels.iter().copied())
        .chain(std::iter::once(last));

    for (col, header) in headers.enumerate() {
        ws.write_string_with_format(HEADER_ROW, col as u16, header, &formats.header_for(col))?;
        ws.set_column_width(col as u16, COLUMN_WIDTH)?;
    }
    Ok(())
}

fn write_average_row(
    ws: &mut Worksheet,
    student_count: usize,
    value_cols: usize,
    formats: &ReportFormats,
) -> SfResult<()> {
    let avg_row = FIRST_DATA_ROW + student_count as u32;
    ws.write_string_with_format(avg_row, 0, "平均", &formats.average_label)?;

    // Spreadsheet rows are 1-based in formulas.
    let first = FIRST_DATA_ROW + 1;
    let last = avg_row;
    for col in 1..=value_cols as u16 {
        let letter = column_number_to_name(col);
        let formula = format!("=AVERAGE({letter}{first}:{letter}{last})");
        ws.write_formula_with_format(avg_row, col, formula.as_str(), &formats.average_value)?;
    }
    Ok(())
}
