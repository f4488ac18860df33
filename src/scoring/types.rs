use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub question_num: u32,
    pub section: String,
    pub point_value: f64,
    pub prompt_text: Option<String>,
    /// 1-based rubric sheet row the question came from.
    pub source_row: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub label: String,
    pub total_points: f64,
    /// Question numbers in rubric row order.
    pub questions: Vec<u32>,
}

/// A rubric row with a question number but no point value, e.g. the
/// continuation of a multi-row prompt. Kept for ordering metadata only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub source_row: usize,
    pub question_num: Option<u32>,
    pub section: Option<String>,
    pub prompt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    /// Scored questions sorted by `question_num`.
    pub questions: Vec<Question>,
    /// Sections in first-seen row order.
    pub sections: Vec<Section>,
    pub informational: Vec<InfoRow>,
    /// Every section label seen on any row carrying a question number,
    /// informational rows included, in first-seen order.
    pub section_labels: Vec<String>,
    /// Prompt text of every row carrying a question number, in row order.
    pub prompts: Vec<String>,
}

impl Rubric {
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    pub fn section_index(&self, label: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.label == label)
    }

    pub fn max_score(&self) -> f64 {
        self.questions.iter().map(|q| q.point_value).sum()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub email: Option<String>,
    /// 0/1 per question position; missing tail entries count as 0.
    pub answers: Vec<u8>,
    /// 1-based answer sheet row.
    pub source_row: usize,
}

impl StudentRecord {
    #[inline(always)]
    pub fn answer(&self, question_num: u32) -> u8 {
        (question_num as usize)
            .checked_sub(1)
            .and_then(|i| self.answers.get(i))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub label: String,
    pub score: f64,
    pub max_score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
}

impl SectionScore {
    /// 0–5 rating, 0 when the section carries no points.
    pub fn rating(&self) -> f64 {
        if self.max_score > 0.0 {
            (self.score / self.max_score) * 5.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStudent {
    pub name: String,
    pub email: Option<String>,
    pub source_row: usize,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub overall_rating: u8,
    /// One entry per rubric section, in rubric section order.
    pub section_scores: Vec<SectionScore>,
    /// Aligned with `Rubric::questions`.
    pub per_question_correctness: Vec<bool>,
    pub answers: Vec<u8>,
}

impl ScoredStudent {
    pub fn section(&self, label: &str) -> Option<&SectionScore> {
        self.section_scores.iter().find(|s| s.label == label)
    }

    pub fn section_rating(&self, label: &str) -> f64 {
        self.section(label).map(SectionScore::rating).unwrap_or(0.0)
    }

    /// Mean of the section ratings, rounded to 2 decimals.
    pub fn average_section_rating(&self) -> f64 {
        if self.section_scores.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.section_scores.iter().map(SectionScore::rating).sum();
        round2(sum / self.section_scores.len() as f64)
    }

    /// Overall value shown on the individual report: each section rating
    /// is rounded to 2 decimals before the mean is taken and rounded.
    pub fn report_average_rating(&self) -> f64 {
        if self.section_scores.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .section_scores
            .iter()
            .map(|s| round2(s.rating()))
            .sum();
        round2(sum / self.section_scores.len() as f64)
    }

    pub fn correct_count(&self) -> usize {
        self.per_question_correctness.iter().filter(|&&c| c).count()
    }
}

/// Per-section mean rating across students, in rubric section order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroupAverages {
    pub entries: Vec<(String, f64)>,
}

impl GroupAverages {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two decimals, ties to even (0.625 -> 0.62).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
