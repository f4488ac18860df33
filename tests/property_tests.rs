use proptest::prelude::*;
use scoreforge::scoring::answers::normalize_answer;
use scoreforge::scoring::calculator::{overall_rating, score_student};
use scoreforge::scoring::rubric::parse_rubric;
use scoreforge::scoring::{Rubric, Scorer, StudentRecord};
use scoreforge::workbook::{CellValue, RawRubricRow};

const LABELS: [&str; 4] = ["語彙", "文法", "読解", "聴解"];

// --- STRATEGIES ---

// Unique question numbers in shuffled row order, integral point values so
// sums are exact.
prop_compose! {
    fn arb_rubric()(
        nums in proptest::sample::subsequence((1u32..=60).collect::<Vec<_>>(), 1..30)
            .prop_shuffle(),
        seed in proptest::collection::vec((0usize..4, 0u32..10), 30)
    ) -> Rubric {
        let rows: Vec<RawRubricRow> = nums
            .iter()
            .enumerate()
            .map(|(i, &q)| {
                let (label, pts) = seed[i];
                RawRubricRow {
                    row: i + 3,
                    section: Some(LABELS[label].to_string()),
                    prompt: None,
                    question: CellValue::Number(q as f64),
                    points: CellValue::Number(pts as f64),
                }
            })
            .collect();
        parse_rubric(&rows).unwrap()
    }
}

prop_compose! {
    fn arb_student()(
        answers in proptest::collection::vec(0u8..=1, 0..70)
    ) -> StudentRecord {
        StudentRecord {
            name: "prop".to_string(),
            email: None,
            answers,
            source_row: 2,
        }
    }
}

proptest! {
    #[test]
    fn prop_section_totals_match_their_questions(rubric in arb_rubric()) {
        for section in &rubric.sections {
            let sum: f64 = section
                .questions
                .iter()
                .filter_map(|n| rubric.questions.iter().find(|q| q.question_num == *n))
                .map(|q| q.point_value)
                .sum();
            prop_assert!((sum - section.total_points).abs() < 1e-9);
        }
        let covered: usize = rubric.sections.iter().map(|s| s.questions.len()).sum();
        prop_assert_eq!(covered, rubric.question_count());
    }

    #[test]
    fn prop_questions_are_sorted_and_unique(rubric in arb_rubric()) {
        let nums: Vec<u32> = rubric.questions.iter().map(|q| q.question_num).collect();
        prop_assert!(nums.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_section_scores_partition_total(rubric in arb_rubric(), record in arb_student()) {
        let scored = score_student(&rubric, &record);
        let sum: f64 = scored.section_scores.iter().map(|s| s.score).sum();
        prop_assert!((sum - scored.total_score).abs() < 1e-9);
        prop_assert_eq!(scored.section_scores.len(), rubric.sections.len());
    }

    #[test]
    fn prop_total_never_exceeds_max(rubric in arb_rubric(), record in arb_student()) {
        let scored = score_student(&rubric, &record);
        prop_assert!(scored.total_score <= scored.max_score);
        prop_assert!((scored.max_score - rubric.max_score()).abs() < 1e-9);
        prop_assert!(scored.percentage >= 0.0 && scored.percentage <= 100.0);
    }

    #[test]
    fn prop_rating_agrees_with_percentage(rubric in arb_rubric(), record in arb_student()) {
        let scored = score_student(&rubric, &record);
        prop_assert_eq!(
            scored.overall_rating,
            overall_rating(scored.percentage, scored.max_score)
        );
    }

    #[test]
    fn prop_scoring_is_idempotent(rubric in arb_rubric(), record in arb_student()) {
        let a = score_student(&rubric, &record);
        let b = score_student(&rubric, &record);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_parallel_matches_sequential(
        rubric in arb_rubric(),
        records in proptest::collection::vec(arb_student(), 0..20)
    ) {
        let scorer = Scorer::new(rubric.clone());
        let parallel = scorer.score_all(&records);
        let sequential: Vec<_> = records.iter().map(|r| score_student(&rubric, r)).collect();
        prop_assert_eq!(parallel, sequential);
    }

    #[test]
    fn prop_group_averages_stay_in_range(
        rubric in arb_rubric(),
        records in proptest::collection::vec(arb_student(), 1..20)
    ) {
        let scorer = Scorer::new(rubric);
        let students = scorer.score_all(&records);
        let averages = scorer.group_averages(&students);
        prop_assert_eq!(averages.len(), scorer.rubric.sections.len());
        for (_, v) in averages.iter() {
            prop_assert!((0.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn prop_any_number_normalizes_to_bit(n in proptest::num::f64::ANY) {
        let v = normalize_answer(&CellValue::Number(n));
        prop_assert!(v == 0 || v == 1);
        prop_assert_eq!(v == 1, n == 1.0);
    }
}
