use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook Read Error: {0}")]
    Workbook(String),

    #[error("Workbook Write Error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Required {role} sheet not found (looked for names containing: {hints})")]
    MissingRequiredSheet { role: String, hints: String },

    #[error("Rubric contains no scored questions")]
    EmptyRubric,

    #[error("No student records found in the answer sheet")]
    NoStudentRecords,

    #[error("Malformed rubric row {row}: {field} value '{value}' cannot be used")]
    MalformedRubricRow {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate question number {question_num} in rubric (rows {first_row} and {row})")]
    DuplicateQuestion {
        question_num: u32,
        first_row: usize,
        row: usize,
    },
}

impl From<calamine::Error> for ScoreForgeError {
    fn from(e: calamine::Error) -> Self {
        ScoreForgeError::Workbook(e.to_string())
    }
}

pub type SfResult<T> = Result<T, ScoreForgeError>;
