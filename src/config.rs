use crate::error::{ScoreForgeError, SfResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub sheets: SheetHints,
    #[command(flatten)]
    pub rubric: RubricLayout,
    #[command(flatten)]
    pub answers: AnswerLayout,
    #[command(flatten)]
    pub output: OutputOptions,
}

/// Name fragments used to locate the input sheets. Matching is a
/// case-insensitive substring test, first sheet in workbook order wins.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetHints {
    #[arg(long, default_value = "取得データ,取得")]
    pub answer_sheet_hints: String,
    #[arg(long, default_value = "配点")]
    pub rubric_sheet_hints: String,
    #[arg(long, default_value = "template,ひな型,雛型")]
    pub template_sheet_hints: String,
}

impl Default for SheetHints {
    fn default() -> Self {
        Self {
            answer_sheet_hints: "取得データ,取得".to_string(),
            rubric_sheet_hints: "配点".to_string(),
            template_sheet_hints: "template,ひな型,雛型".to_string(),
        }
    }
}

impl SheetHints {
    pub fn answer_hints(&self) -> Vec<String> {
        split_list(&self.answer_sheet_hints)
    }

    pub fn rubric_hints(&self) -> Vec<String> {
        split_list(&self.rubric_sheet_hints)
    }

    pub fn template_hints(&self) -> Vec<String> {
        split_list(&self.template_sheet_hints)
    }
}

// Rows and columns below are 1-based, as a spreadsheet user reads them.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricLayout {
    #[arg(long, default_value_t = 3)]
    pub rubric_first_row: usize,
    #[arg(long, default_value_t = 2)]
    pub rubric_section_col: usize,
    #[arg(long, default_value_t = 3)]
    pub rubric_prompt_col: usize,
    #[arg(long, default_value_t = 4)]
    pub rubric_question_col: usize,
    #[arg(long, default_value_t = 5)]
    pub rubric_points_col: usize,
}

impl Default for RubricLayout {
    fn default() -> Self {
        Self {
            rubric_first_row: 3,
            rubric_section_col: 2,
            rubric_prompt_col: 3,
            rubric_question_col: 4,
            rubric_points_col: 5,
        }
    }
}

#[derive(
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStrategy {
    /// Read every stride position up to the column bound; an empty primary
    /// cell falls back to the cell one column to the right.
    #[default]
    DualCell,
    /// Read primary cells only and stop at the first blank position.
    StopOnBlank,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerLayout {
    #[arg(long, default_value_t = 2)]
    pub answers_first_row: usize,
    #[arg(long, default_value_t = 12)]
    pub answers_name_col: usize,
    #[arg(long)]
    pub answers_email_col: Option<usize>,
    #[arg(long, default_value_t = 17)]
    pub answers_first_col: usize,
    #[arg(long, default_value_t = 3)]
    pub answers_stride: usize,
    #[arg(long, default_value_t = 195)]
    pub answers_max_col: usize,
    #[arg(long, value_enum, default_value_t = AnswerStrategy::DualCell)]
    pub answers_strategy: AnswerStrategy,
}

impl Default for AnswerLayout {
    fn default() -> Self {
        Self {
            answers_first_row: 2,
            answers_name_col: 12,
            answers_email_col: None,
            answers_first_col: 17,
            answers_stride: 3,
            answers_max_col: 195,
            answers_strategy: AnswerStrategy::DualCell,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    #[arg(long, default_value = "_出力")]
    pub output_suffix: String,
    #[arg(long, default_value = "総合得点")]
    pub summary_sheet_name: String,
    #[arg(long, default_value = "5点評価")]
    pub rating_sheet_name: String,
    /// First row of the per-student section table on report sheets.
    #[arg(long, default_value_t = 27)]
    pub report_table_row: usize,
    #[arg(long, default_value_t = 5)]
    pub report_max_sections: usize,
    #[arg(long, default_value_t = false)]
    pub no_radar_chart: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_suffix: "_出力".to_string(),
            summary_sheet_name: "総合得点".to_string(),
            rating_sheet_name: "5点評価".to_string(),
            report_table_row: 27,
            report_max_sections: 5,
            no_radar_chart: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlays every flag the user actually typed onto `self`, leaving
    /// values that came from defaults untouched.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(sheets.answer_sheet_hints);
        update_if_present!(sheets.rubric_sheet_hints);
        update_if_present!(sheets.template_sheet_hints);

        update_if_present!(rubric.rubric_first_row);
        update_if_present!(rubric.rubric_section_col);
        update_if_present!(rubric.rubric_prompt_col);
        update_if_present!(rubric.rubric_question_col);
        update_if_present!(rubric.rubric_points_col);

        update_if_present!(answers.answers_first_row);
        update_if_present!(answers.answers_name_col);
        update_if_present!(answers.answers_email_col);
        update_if_present!(answers.answers_first_col);
        update_if_present!(answers.answers_stride);
        update_if_present!(answers.answers_max_col);
        update_if_present!(answers.answers_strategy);

        update_if_present!(output.output_suffix);
        update_if_present!(output.summary_sheet_name);
        update_if_present!(output.rating_sheet_name);
        update_if_present!(output.report_table_row);
        update_if_present!(output.report_max_sections);
        update_if_present!(output.no_radar_chart);
    }

    pub fn validate(&self) -> SfResult<()> {
        let r = &self.rubric;
        let a = &self.answers;

        let one_based = [
            ("rubric_first_row", r.rubric_first_row),
            ("rubric_section_col", r.rubric_section_col),
            ("rubric_prompt_col", r.rubric_prompt_col),
            ("rubric_question_col", r.rubric_question_col),
            ("rubric_points_col", r.rubric_points_col),
            ("answers_first_row", a.answers_first_row),
            ("answers_name_col", a.answers_name_col),
            ("answers_first_col", a.answers_first_col),
            ("answers_max_col", a.answers_max_col),
            ("report_table_row", self.output.report_table_row),
        ];
        for (name, value) in one_based {
            if value == 0 {
                return Err(ScoreForgeError::Config(format!(
                    "--{} is 1-based and must be at least 1",
                    name.replace('_', "-")
                )));
            }
        }

        if a.answers_email_col == Some(0) {
            return Err(ScoreForgeError::Config(
                "--answers-email-col is 1-based and must be at least 1".to_string(),
            ));
        }
        if a.answers_stride == 0 {
            return Err(ScoreForgeError::Config(
                "--answers-stride must be at least 1".to_string(),
            ));
        }
        if a.answers_max_col < a.answers_first_col {
            return Err(ScoreForgeError::Config(format!(
                "--answers-max-col ({}) is before --answers-first-col ({})",
                a.answers_max_col, a.answers_first_col
            )));
        }
        if self.sheets.answer_hints().is_empty() || self.sheets.rubric_hints().is_empty() {
            return Err(ScoreForgeError::Config(
                "answer and rubric sheet hints must not be empty".to_string(),
            ));
        }
        if self.output.summary_sheet_name.trim().is_empty()
            || self.output.rating_sheet_name.trim().is_empty()
        {
            return Err(ScoreForgeError::Config(
                "summary and rating sheet names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
