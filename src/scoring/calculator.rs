use super::types::{Rubric, ScoredStudent, SectionScore, StudentRecord};

/// Scores one student against the rubric. Pure: the same inputs always
/// produce the same result, and missing or invalid answers only ever count
/// as incorrect.
pub fn score_student(rubric: &Rubric, record: &StudentRecord) -> ScoredStudent {
    let mut section_scores: Vec<SectionScore> = rubric
        .sections
        .iter()
        .map(|s| SectionScore {
            label: s.label.clone(),
            score: 0.0,
            max_score: s.total_points,
            correct_count: 0,
            total_questions: s.questions.len(),
        })
        .collect();

    let mut total_score = 0.0;
    let mut max_score = 0.0;
    let mut per_question_correctness = Vec::with_capacity(rubric.questions.len());

    for q in &rubric.questions {
        max_score += q.point_value;

        let correct = record.answer(q.question_num) == 1;
        if correct {
            total_score += q.point_value;
            if let Some(idx) = rubric.section_index(&q.section) {
                let s = &mut section_scores[idx];
                s.score += q.point_value;
                s.correct_count += 1;
            }
        }
        per_question_correctness.push(correct);
    }

    let percentage = if max_score > 0.0 {
        (total_score / max_score) * 100.0
    } else {
        0.0
    };

    ScoredStudent {
        name: record.name.clone(),
        email: record.email.clone(),
        source_row: record.source_row,
        total_score,
        max_score,
        percentage,
        overall_rating: overall_rating(percentage, max_score),
        section_scores,
        per_question_correctness,
        answers: record.answers.clone(),
    }
}

/// Coarse 1–5 band, lower edges inclusive. A rubric worth nothing rates 0.
pub fn overall_rating(percentage: f64, max_score: f64) -> u8 {
    if max_score <= 0.0 {
        return 0;
    }
    match percentage {
        p if p >= 90.0 => 5,
        p if p >= 80.0 => 4,
        p if p >= 70.0 => 3,
        p if p >= 60.0 => 2,
        _ => 1,
    }
}
