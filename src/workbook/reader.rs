use super::{CellValue, Grid, WorkbookSnapshot};
use crate::error::{ScoreForgeError, SfResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Loads either a spreadsheet file or a directory of CSV files.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> SfResult<WorkbookSnapshot> {
    let path = path.as_ref();
    if path.is_dir() {
        load_csv_dir(path)
    } else {
        load_workbook(path)
    }
}

pub fn load_workbook<P: AsRef<Path>>(path: P) -> SfResult<WorkbookSnapshot> {
    let path = path.as_ref();
    info!("📂 Loading Workbook: {}", path.display());

    let mut workbook = open_workbook_auto(path)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut snapshot = WorkbookSnapshot::default();

    for name in sheet_names {
        let range = workbook.worksheet_range(&name)?;
        let grid = grid_from_range(&range);
        debug!(
            "   Sheet '{}': {} rows x {} cols",
            name,
            grid.height(),
            grid.width()
        );
        snapshot.push(name, grid);
    }

    if snapshot.sheets.is_empty() {
        return Err(ScoreForgeError::Workbook(format!(
            "'{}' contains no sheets",
            path.display()
        )));
    }
    Ok(snapshot)
}

/// Every `*.csv` file in `dir` becomes one sheet named after its file stem,
/// in file-name order.
pub fn load_csv_dir<P: AsRef<Path>>(dir: P) -> SfResult<WorkbookSnapshot> {
    let dir = dir.as_ref();
    info!("📂 Loading CSV sheets from: {}", dir.display());

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut snapshot = WorkbookSnapshot::default();
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let grid = Grid::from_csv_reader(fs::File::open(&path)?)?;
        debug!(
            "   Sheet '{}': {} rows x {} cols",
            name,
            grid.height(),
            grid.width()
        );
        snapshot.push(name, grid);
    }

    if snapshot.sheets.is_empty() {
        return Err(ScoreForgeError::Workbook(format!(
            "no .csv files found in '{}'",
            dir.display()
        )));
    }
    Ok(snapshot)
}

impl Grid {
    pub fn from_csv_reader<R: Read>(reader: R) -> SfResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let rec = result?;
            rows.push(rec.iter().map(CellValue::from_raw_text).collect());
        }
        Ok(Grid::new(rows))
    }
}

// calamine ranges begin at the first used cell; pad so the grid starts at A1.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let (row0, col0) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Grid::default(),
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row0];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col0];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }
    Grid::new(rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
