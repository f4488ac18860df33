use super::{copy_values, ReportFormats};
use crate::config::OutputOptions;
use crate::error::SfResult;
use crate::pipeline::RunOutput;
use crate::scoring::types::round2;
use crate::scoring::ScoredStudent;
use crate::workbook::Grid;
use rust_xlsxwriter::{Chart, ChartType, Workbook};

const NAME_CELL: (u32, u16) = (1, 0); // A2
const OVERALL_CELL: (u32, u16) = (3, 4); // E4
const CHART_ANCHOR: (u32, u16) = (7, 1); // B8

const LABEL_COL: u16 = 1;
const GROUP_AVG_COL: u16 = 2;
const STUDENT_COL: u16 = 3;

/// Star cells F4:J4. Star `n` is full at E4 >= n, half from n-1 up to n.
const STAR_FORMULAS: [&str; 5] = [
    r#"=IF(E4>=1,"★","☆")"#,
    r#"=IF(E4>=2,"★",IF(AND(E4>=1,E4<2),"◐","☆"))"#,
    r#"=IF(E4>=3,"★",IF(AND(E4>=2,E4<3),"◐","☆"))"#,
    r#"=IF(E4>=4,"★",IF(AND(E4>=3,E4<4),"◐","☆"))"#,
    r#"=IF(E4>=5,"★",IF(AND(E4>=4,E4<5),"◐","☆"))"#,
];

pub fn write_student_report(
    workbook: &mut Workbook,
    sheet_name: &str,
    student: &ScoredStudent,
    result: &RunOutput,
    template: Option<&Grid>,
    options: &OutputOptions,
    formats: &ReportFormats,
) -> SfResult<()> {
    let ws = workbook.add_worksheet();
    ws.set_name(sheet_name)?;
    if let Some(grid) = template {
        copy_values(ws, grid)?;
    }

    ws.write_string(NAME_CELL.0, NAME_CELL.1, &student.name)?;

    let first_row = options.report_table_row.saturating_sub(1) as u32;
    let shown = student
        .section_scores
        .iter()
        .take(options.report_max_sections)
        .collect::<Vec<_>>();

    for (i, s) in shown.iter().enumerate() {
        let row = first_row + i as u32;
        ws.write_string(row, LABEL_COL, &s.label)?;
        if let Some(avg) = result.averages.get(&s.label) {
            ws.write_number(row, GROUP_AVG_COL, avg)?;
        }
        ws.write_number(row, STUDENT_COL, round2(s.rating()))?;
    }

    ws.write_number(OVERALL_CELL.0, OVERALL_CELL.1, student.report_average_rating())?;
    for (i, formula) in STAR_FORMULAS.iter().enumerate() {
        ws.write_formula_with_format(OVERALL_CELL.0, OVERALL_CELL.1 + 1 + i as u16, *formula, &formats.star)?;
    }

    if !options.no_radar_chart && !shown.is_empty() {
        let last_row = first_row + shown.len() as u32 - 1;
        let chart = radar_chart(sheet_name, first_row, last_row);
        ws.insert_chart(CHART_ANCHOR.0, CHART_ANCHOR.1, &chart)?;
    }
    Ok(())
}

/// Two series over the section table: group average and this student.
fn radar_chart(sheet_name: &str, first_row: u32, last_row: u32) -> Chart {
    let mut chart = Chart::new(ChartType::Radar);
    let categories = (sheet_name, first_row, LABEL_COL, last_row, LABEL_COL);

    chart
        .add_series()
        .set_categories(categories)
        .set_values((sheet_name, first_row, GROUP_AVG_COL, last_row, GROUP_AVG_COL))
        .set_name("社内平均");
    chart
        .add_series()
        .set_categories(categories)
        .set_values((sheet_name, first_row, STUDENT_COL, last_row, STUDENT_COL))
        .set_name("今回の得点");

    chart.y_axis().set_min(0.0).set_max(5.0);
    chart
}
