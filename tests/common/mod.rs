#![allow(dead_code)]

use scoreforge::workbook::{CellValue, Grid, WorkbookSnapshot};
use std::path::Path;

pub const ANSWER_SHEET: &str = "取得データ";
pub const RUBRIC_SHEET: &str = "配点";
pub const TEMPLATE_SHEET: &str = "template";

/// One answer sheet row in the default layout: name in column L, answers
/// from column Q every third column.
pub fn answer_row(name: &str, answers: &[&str]) -> Vec<CellValue> {
    let mut row = vec![CellValue::Empty; 11];
    row.push(CellValue::from_raw_text(name));
    row.extend(vec![CellValue::Empty; 4]);
    for a in answers {
        row.push(CellValue::from_raw_text(a));
        row.push(CellValue::Empty);
        row.push(CellValue::Empty);
    }
    row
}

pub fn answer_grid(students: &[(&str, &[&str])]) -> Grid {
    let mut header = vec![CellValue::Empty; 11];
    header.push(CellValue::Text("氏名".to_string()));
    let mut rows = vec![header];
    rows.extend(students.iter().map(|(name, answers)| answer_row(name, answers)));
    Grid::new(rows)
}

/// Rubric sheet in the default layout: a title row, a header row, then
/// `(section, prompt, question, points)` in columns B..E.
pub fn rubric_grid(rows: &[(&str, &str, &str, &str)]) -> Grid {
    let mut out = vec![
        vec![CellValue::Text("配点表".to_string())],
        ["", "区分", "問題", "番号", "配点"]
            .iter()
            .map(|s| CellValue::from_raw_text(s))
            .collect(),
    ];
    for (section, prompt, question, points) in rows {
        out.push(vec![
            CellValue::Empty,
            CellValue::from_raw_text(section),
            CellValue::from_raw_text(prompt),
            CellValue::from_raw_text(question),
            CellValue::from_raw_text(points),
        ]);
    }
    Grid::new(out)
}

/// Section 語彙 holds Q1 (2 pts) and Q2 (3 pts), 文法 holds Q3 (5 pts).
pub fn sample_rubric() -> Grid {
    rubric_grid(&[
        ("語彙", "Choose the synonym", "1", "2"),
        ("語彙", "Fill the blank", "2", "3"),
        ("", "(continued)", "2", ""),
        ("文法", "Correct the sentence", "3", "5"),
    ])
}

pub fn sample_answers() -> Grid {
    answer_grid(&[
        ("田中", &["1", "0", "1"]),
        ("佐藤", &["1", "1", "1"]),
        ("", &["1", "1", "1"]),
        ("鈴木", &["0", "0", "0"]),
    ])
}

pub fn sample_template() -> Grid {
    Grid::new(vec![vec![CellValue::Text("個人成績表".to_string())]])
}

pub fn sample_snapshot() -> WorkbookSnapshot {
    let mut snapshot = WorkbookSnapshot::default();
    snapshot.push(ANSWER_SHEET, sample_answers());
    snapshot.push(RUBRIC_SHEET, sample_rubric());
    snapshot.push(TEMPLATE_SHEET, sample_template());
    snapshot
}

/// Writes every sheet of `snapshot` as `<dir>/<sheet>.csv`.
pub fn write_csv_dir(dir: &Path, snapshot: &WorkbookSnapshot) {
    for sheet in &snapshot.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .unwrap();
        for row in sheet.grid.rows() {
            wtr.write_record(row.iter().map(|c| c.display())).unwrap();
        }
        wtr.flush().unwrap();
    }
}
