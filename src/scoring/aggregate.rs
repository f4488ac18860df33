use super::types::{round2, GroupAverages, Rubric, ScoredStudent};

/// Mean section rating across students, rounded to 2 decimals. Students
/// whose section is worth nothing are left out of that section's mean; a
/// section nobody contributes to averages 0.
pub fn group_averages(rubric: &Rubric, students: &[ScoredStudent]) -> GroupAverages {
    let entries = rubric
        .sections
        .iter()
        .map(|section| {
            let (sum, count) = students
                .iter()
                .filter_map(|st| st.section(&section.label))
                .filter(|s| s.max_score > 0.0)
                .fold((0.0, 0usize), |(sum, n), s| (sum + s.rating(), n + 1));

            let avg = if count > 0 {
                round2(sum / count as f64)
            } else {
                0.0
            };
            (section.label.clone(), avg)
        })
        .collect();

    GroupAverages { entries }
}
