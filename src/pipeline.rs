use crate::config::Config;
use crate::error::{ScoreForgeError, SfResult};
use crate::report;
use crate::scoring::answers::parse_answer_rows;
use crate::scoring::{GroupAverages, Rubric, ScoredStudent, Scorer};
use crate::workbook::{
    extract_answer_rows, extract_rubric_rows, load_snapshot, ResolvedSheets, WorkbookSnapshot,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one run computes. Built once, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub rubric: Rubric,
    pub students: Vec<ScoredStudent>,
    pub averages: GroupAverages,
}

#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub students: usize,
    pub output_path: PathBuf,
}

/// Resolves the input sheets and runs the scoring pipeline.
pub fn run(snapshot: &WorkbookSnapshot, config: &Config) -> SfResult<RunOutput> {
    config.validate()?;
    let sheets = snapshot.resolve(&config.sheets)?;
    score_sheets(&sheets, config)
}

pub fn score_sheets(sheets: &ResolvedSheets<'_>, config: &Config) -> SfResult<RunOutput> {
    // With both regions empty, NoStudentRecords is the reported error.
    let answer_rows = extract_answer_rows(&sheets.answers.grid, &config.answers);
    let records = parse_answer_rows(&answer_rows, &config.answers);
    if records.is_empty() {
        return Err(ScoreForgeError::NoStudentRecords);
    }

    let rubric_rows = extract_rubric_rows(&sheets.rubric.grid, &config.rubric);
    let scorer = Scorer::from_rows(&rubric_rows)?;

    let students = scorer.score_all(&records);
    let averages = scorer.group_averages(&students);
    info!(
        "🧮 Scored {} students against {} questions",
        students.len(),
        scorer.rubric.question_count()
    );

    Ok(RunOutput {
        rubric: scorer.rubric,
        students,
        averages,
    })
}

/// Load, score, assemble and save. Nothing is written unless every step
/// before saving succeeded.
pub fn generate(input: &Path, output: Option<&Path>, config: &Config) -> SfResult<GenerateSummary> {
    let snapshot = load_snapshot(input)?;
    config.validate()?;
    let sheets = snapshot.resolve(&config.sheets)?;
    let result = score_sheets(&sheets, config)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(input, &config.output.output_suffix),
    };

    let mut workbook = report::assemble(&snapshot, &sheets, &result, config)?;
    workbook.save(&output_path)?;
    info!("💾 Saved: {}", output_path.display());

    Ok(GenerateSummary {
        students: result.students.len(),
        output_path,
    })
}

/// `<dir>/<stem><suffix>.xlsx` next to the input.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    let file_name = format!("{}{}.xlsx", stem, suffix);
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
