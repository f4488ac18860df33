use super::types::{InfoRow, Question, Rubric, Section};
use crate::error::{ScoreForgeError, SfResult};
use crate::workbook::{CellValue, RawRubricRow};
use std::collections::HashMap;
use tracing::{debug, info};

/// Builds the rubric from raw rows.
///
/// Pass one walks the rows in sheet order and yields the scored questions
/// (plus informational rows); pass two groups those questions into
/// sections. Sections therefore keep first-seen row order, while the
/// returned question list is sorted by question number.
pub fn parse_rubric(rows: &[RawRubricRow]) -> SfResult<Rubric> {
    let mut questions: Vec<Question> = Vec::new();
    let mut informational = Vec::new();
    let mut section_labels: Vec<String> = Vec::new();
    let mut prompts = Vec::new();
    let mut seen: HashMap<u32, usize> = HashMap::new();

    for raw in rows {
        if raw.question.is_blank() {
            continue;
        }

        let section = raw.section.clone().unwrap_or_default();
        if !section.is_empty() && !section_labels.contains(&section) {
            section_labels.push(section.clone());
        }
        prompts.push(raw.prompt.clone().unwrap_or_default());

        if raw.points.is_blank() {
            debug!("   Rubric row {} has no point value (informational)", raw.row);
            informational.push(InfoRow {
                source_row: raw.row,
                question_num: coerce_question_num(&raw.question),
                section: raw.section.clone(),
                prompt_text: raw.prompt.clone(),
            });
            continue;
        }

        let question_num =
            coerce_question_num(&raw.question).ok_or_else(|| ScoreForgeError::MalformedRubricRow {
                row: raw.row,
                field: "question number",
                value: raw.question.display(),
            })?;
        let point_value =
            coerce_point_value(&raw.points).ok_or_else(|| ScoreForgeError::MalformedRubricRow {
                row: raw.row,
                field: "point value",
                value: raw.points.display(),
            })?;

        if let Some(&first_row) = seen.get(&question_num) {
            return Err(ScoreForgeError::DuplicateQuestion {
                question_num,
                first_row,
                row: raw.row,
            });
        }
        seen.insert(question_num, raw.row);

        questions.push(Question {
            question_num,
            section,
            point_value,
            prompt_text: raw.prompt.clone(),
            source_row: raw.row,
        });
    }

    if questions.is_empty() {
        return Err(ScoreForgeError::EmptyRubric);
    }

    let sections = group_sections(&questions);
    questions.sort_by_key(|q| q.question_num);

    info!(
        "📋 Rubric: {} questions in {} sections ({} informational rows), {} points total",
        questions.len(),
        sections.len(),
        informational.len(),
        questions.iter().map(|q| q.point_value).sum::<f64>()
    );

    Ok(Rubric {
        questions,
        sections,
        informational,
        section_labels,
        prompts,
    })
}

/// Groups questions by section label, keeping the order in which labels
/// first appear in `questions`.
pub fn group_sections(questions: &[Question]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for q in questions {
        let idx = *index.entry(q.section.as_str()).or_insert_with(|| {
            sections.push(Section {
                label: q.section.clone(),
                total_points: 0.0,
                questions: Vec::new(),
            });
            sections.len() - 1
        });
        let section = &mut sections[idx];
        section.total_points += q.point_value;
        section.questions.push(q.question_num);
    }
    sections
}

/// Positive whole numbers only; `3.0` and `" 3 "` both read as 3.
pub fn coerce_question_num(cell: &CellValue) -> Option<u32> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let t = s.trim();
            match t.parse::<u32>() {
                Ok(v) => return (v > 0).then_some(v),
                Err(_) => t.parse::<f64>().ok()?,
            }
        }
        _ => return None,
    };
    if n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

pub fn coerce_point_value(cell: &CellValue) -> Option<f64> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}
