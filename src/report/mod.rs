//! Output workbook assembly.
//!
//! The input sheets are re-emitted as plain values, followed by the
//! summary sheet, the rating sheet and one report sheet per student.

pub mod individual;
pub mod tables;

use crate::config::Config;
use crate::error::SfResult;
use crate::pipeline::RunOutput;
use crate::workbook::{CellValue, Grid, ResolvedSheets, WorkbookSnapshot};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::collections::HashSet;
use tracing::{debug, info};

/// Fill colours for header cells, applied left to right.
pub const HEADER_COLORS: [u32; 7] = [
    0xB7DEE8, 0xDCE6F1, 0xFDE9D9, 0xEAF1DD, 0xE4DFEC, 0xFDE9D9, 0xF8CBAD,
];

pub const MAX_SHEET_NAME_CHARS: usize = 31;

pub struct ReportFormats {
    pub header: Format,
    pub text: Format,
    pub number: Format,
    pub rating: Format,
    pub integer: Format,
    pub average_label: Format,
    pub average_value: Format,
    pub star: Format,
}

impl ReportFormats {
    pub fn new() -> Self {
        let text = Format::new().set_border(FormatBorder::Thin);
        let number = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Right);
        let rating = Format::new()
            .set_num_format("0.00")
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Right);
        let integer = Format::new()
            .set_num_format("0")
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Right);
        let average_label = Format::new().set_bold().set_border(FormatBorder::Thin);
        let average_value = Format::new()
            .set_bold()
            .set_num_format("0.00")
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Right);
        let star = Format::new()
            .set_font_name("Arial")
            .set_font_size(16)
            .set_font_color(0xFFD700)
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        Self {
            header: Format::new().set_bold().set_border(FormatBorder::Thin),
            text,
            number,
            rating,
            integer,
            average_label,
            average_value,
            star,
        }
    }

    /// Header format for column `col`, coloured while the palette lasts.
    pub fn header_for(&self, col: usize) -> Format {
        match HEADER_COLORS.get(col) {
            Some(&color) => self.header.clone().set_background_color(color),
            None => self.header.clone(),
        }
    }
}

impl Default for ReportFormats {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out unique, Excel-legal sheet names. Excel compares sheet names
/// case-insensitively.
#[derive(Debug, Default)]
pub struct SheetNamer {
    taken: HashSet<String>,
}

impl SheetNamer {
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_lowercase());
    }

    pub fn claim(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
            candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
            n += 1;
        }
        self.reserve(&candidate);
        candidate
    }
}

/// Replaces characters Excel forbids, strips edge apostrophes and cuts
/// to 31 characters.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('\'');
    let name: String = trimmed.chars().take(MAX_SHEET_NAME_CHARS).collect();
    if name.is_empty() {
        "Sheet".to_string()
    } else {
        name
    }
}

pub fn assemble(
    snapshot: &WorkbookSnapshot,
    sheets: &ResolvedSheets<'_>,
    result: &RunOutput,
    config: &Config,
) -> SfResult<Workbook> {
    let mut workbook = Workbook::new();
    let formats = ReportFormats::new();
    let out = &config.output;

    let mut namer = SheetNamer::default();
    namer.reserve(&out.summary_sheet_name);
    namer.reserve(&out.rating_sheet_name);

    for sheet in &snapshot.sheets {
        // Regenerated below.
        if sheet.name == out.summary_sheet_name || sheet.name == out.rating_sheet_name {
            debug!("   Replacing existing sheet '{}'", sheet.name);
            continue;
        }
        let name = namer.claim(&sheet.name);
        let ws = workbook.add_worksheet();
        ws.set_name(&name)?;
        copy_values(ws, &sheet.grid)?;

        if std::ptr::eq(sheet, sheets.answers) {
            tables::append_section_scores(ws, &sheet.grid, result, config, &formats)?;
        }
    }

    let ws = workbook.add_worksheet();
    ws.set_name(&out.summary_sheet_name)?;
    tables::write_summary(ws, result, &formats)?;

    let ws = workbook.add_worksheet();
    ws.set_name(&out.rating_sheet_name)?;
    tables::write_ratings(ws, result, &formats)?;

    for student in &result.students {
        let name = namer.claim(&student.name);
        individual::write_student_report(
            &mut workbook,
            &name,
            student,
            result,
            sheets.template.map(|t| &t.grid),
            out,
            &formats,
        )?;
    }

    info!(
        "📝 Assembled {} individual reports plus summary and rating sheets",
        result.students.len()
    );
    Ok(workbook)
}

/// Writes every non-empty cell of `grid` as a plain value.
pub fn copy_values(ws: &mut Worksheet, grid: &Grid) -> SfResult<()> {
    for (r, row) in grid.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    ws.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    ws.write_number(r, c, *n)?;
                }
                CellValue::Bool(b) => {
                    ws.write_boolean(r, c, *b)?;
                }
            }
        }
    }
    Ok(())
}
