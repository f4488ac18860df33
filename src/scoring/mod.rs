pub mod aggregate;
pub mod answers;
pub mod calculator;
pub mod rubric;
pub mod types;

pub use self::types::{
    GroupAverages, InfoRow, Question, Rubric, ScoredStudent, Section, SectionScore, StudentRecord,
};

use crate::error::SfResult;
use crate::workbook::RawRubricRow;
use rayon::prelude::*;

/// Holds the immutable rubric for one run and scores students against it.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub rubric: Rubric,
}

impl Scorer {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn from_rows(rows: &[RawRubricRow]) -> SfResult<Self> {
        Ok(Self::new(rubric::parse_rubric(rows)?))
    }

    pub fn score(&self, record: &StudentRecord) -> ScoredStudent {
        calculator::score_student(&self.rubric, record)
    }

    /// Students are independent, so they are scored in parallel. Output
    /// order matches input order.
    pub fn score_all(&self, records: &[StudentRecord]) -> Vec<ScoredStudent> {
        records.par_iter().map(|r| self.score(r)).collect()
    }

    pub fn group_averages(&self, students: &[ScoredStudent]) -> GroupAverages {
        aggregate::group_averages(&self.rubric, students)
    }
}
