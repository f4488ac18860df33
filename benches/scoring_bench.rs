use criterion::{criterion_group, criterion_main, Criterion};
use scoreforge::config::AnswerLayout;
use scoreforge::scoring::answers::parse_answer_rows;
use scoreforge::scoring::{Scorer, StudentRecord};
use scoreforge::workbook::{CellValue, RawAnswerRow, RawRubricRow};
use std::hint::black_box;

const QUESTIONS: usize = 60;
const STUDENTS: usize = 2000;

fn setup_scorer() -> Scorer {
    let sections = ["語彙", "文法", "読解", "聴解", "表現"];
    let rows: Vec<RawRubricRow> = (0..QUESTIONS)
        .map(|i| RawRubricRow {
            row: i + 3,
            section: Some(sections[i % sections.len()].to_string()),
            prompt: Some(format!("Question {}", i + 1)),
            question: CellValue::Number((i + 1) as f64),
            points: CellValue::Number(((i % 4) + 1) as f64),
        })
        .collect();
    Scorer::from_rows(&rows).expect("Failed to build rubric")
}

// Wide rows in the default layout, with every seventh answer shifted one
// column right so the fallback path is exercised.
fn setup_answer_rows() -> Vec<RawAnswerRow> {
    (0..STUDENTS)
        .map(|s| {
            let mut cells = vec![CellValue::Empty; 16 + QUESTIONS * 3];
            cells[11] = CellValue::Text(format!("Student {}", s));
            for q in 0..QUESTIONS {
                let col = 16 + q * 3 + usize::from(q % 7 == 0);
                cells[col] = CellValue::Number(((s + q) % 3 != 0) as u8 as f64);
            }
            RawAnswerRow {
                row: s + 2,
                name: Some(format!("Student {}", s)),
                email: None,
                cells,
            }
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let scorer = setup_scorer();
    let layout = AnswerLayout::default();
    let raw = setup_answer_rows();
    let records: Vec<StudentRecord> = parse_answer_rows(&raw, &layout);

    c.bench_function("parse_answers (2k rows)", |b| {
        b.iter(|| parse_answer_rows(black_box(&raw), black_box(&layout)))
    });

    c.bench_function("score_all (2k students x 60 q)", |b| {
        b.iter(|| scorer.score_all(black_box(&records)))
    });

    let students = scorer.score_all(&records);
    c.bench_function("group_averages (2k students)", |b| {
        b.iter(|| scorer.group_averages(black_box(&students)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
