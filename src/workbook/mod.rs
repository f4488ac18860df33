//! Input boundary: an in-memory snapshot of the workbook's sheets.
//!
//! Everything that involves file formats, sheet names or column positions
//! is resolved here, once. The scoring core only ever sees the raw rows
//! produced by [`extract`].

pub mod extract;
pub mod reader;

use crate::config::SheetHints;
use crate::error::{ScoreForgeError, SfResult};
use tracing::{info, warn};

pub use self::extract::{extract_answer_rows, extract_rubric_rows, RawAnswerRow, RawRubricRow};
pub use self::reader::{load_csv_dir, load_snapshot, load_workbook};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

pub(crate) static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Whitespace-only text counts as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed textual rendering, `None` when blank.
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.display().trim().to_string())
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }

    /// Converts raw text from a delimited file: blank -> Empty, numeric -> Number.
    pub fn from_raw_text(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            return CellValue::Empty;
        }
        match t.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(s.to_string()),
        }
    }
}

/// Rectangular cell grid anchored at A1. Access is 0-based; out-of-range
/// reads return an empty cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

#[derive(Debug, Clone, Default)]
pub struct WorkbookSnapshot {
    pub sheets: Vec<Sheet>,
}

/// The three input regions, located once by name.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSheets<'a> {
    pub answers: &'a Sheet,
    pub rubric: &'a Sheet,
    pub template: Option<&'a Sheet>,
}

impl WorkbookSnapshot {
    pub fn push(&mut self, name: impl Into<String>, grid: Grid) {
        self.sheets.push(Sheet {
            name: name.into(),
            grid,
        });
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// First sheet (workbook order) whose name contains any of the hints,
    /// compared case-insensitively.
    pub fn find_sheet(&self, hints: &[String]) -> Option<&Sheet> {
        let hints: Vec<String> = hints.iter().map(|h| h.to_lowercase()).collect();
        self.sheets.iter().find(|s| {
            let name = s.name.to_lowercase();
            hints.iter().any(|h| name.contains(h.as_str()))
        })
    }

    pub fn resolve(&self, hints: &SheetHints) -> SfResult<ResolvedSheets<'_>> {
        let answer_hints = hints.answer_hints();
        let answers = self
            .find_sheet(&answer_hints)
            .ok_or_else(|| ScoreForgeError::MissingRequiredSheet {
                role: "answer data".to_string(),
                hints: answer_hints.join(", "),
            })?;

        let rubric_hints = hints.rubric_hints();
        let rubric = self
            .find_sheet(&rubric_hints)
            .ok_or_else(|| ScoreForgeError::MissingRequiredSheet {
                role: "rubric".to_string(),
                hints: rubric_hints.join(", "),
            })?;

        let template = self.find_sheet(&hints.template_hints());
        if template.is_none() {
            warn!("⚠️  No template sheet found. Report sheets will start blank.");
        }

        info!(
            "📑 Sheets resolved: answers='{}', rubric='{}', template={}",
            answers.name,
            rubric.name,
            template
                .map(|t| format!("'{}'", t.name))
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(ResolvedSheets {
            answers,
            rubric,
            template,
        })
    }
}
