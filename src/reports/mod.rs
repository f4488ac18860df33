use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scoreforge::pipeline::GenerateSummary;
use scoreforge::scoring::{GroupAverages, Rubric, ScoredStudent};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn rating_cell(rating: u8) -> Cell {
    let cell = Cell::new(rating).add_attribute(Attribute::Bold);
    match rating {
        4..=5 => cell.fg(Color::Green),
        3 => cell.fg(Color::Yellow),
        _ => cell.fg(Color::Red),
    }
}

pub fn print_rubric_report(rubric: &Rubric) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Section").add_attribute(Attribute::Bold),
        Cell::new("Questions"),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=2);

    for section in &rubric.sections {
        let first = section.questions.first().copied().unwrap_or(0);
        let last = section.questions.last().copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(&section.label).add_attribute(Attribute::Bold),
            Cell::new(format!("{} (Q{}-Q{})", section.questions.len(), first, last)),
            Cell::new(format!("{:.1}", section.total_points)).fg(Color::Cyan),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(rubric.question_count()),
        Cell::new(format!("{:.1}", rubric.max_score())).add_attribute(Attribute::Bold),
    ]);
    println!("{}", table);

    if !rubric.informational.is_empty() {
        println!("ℹ️  {} informational rows (no point value)", rubric.informational.len());
    }
}

pub fn print_student_report(rubric: &Rubric, students: &[ScoredStudent]) {
    let mut table = new_table();

    let mut header = vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("%"),
        Cell::new("Rating"),
    ];
    header.extend(rubric.sections.iter().map(|s| Cell::new(&s.label)));
    header.push(Cell::new("Avg ★").add_attribute(Attribute::Bold));
    let last_col = header.len() - 1;
    table.add_row(header);
    align_right(&mut table, 1..=last_col);

    for s in students {
        let mut row = vec![
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}/{:.1}", s.total_score, s.max_score)).fg(Color::Cyan),
            Cell::new(format!("{:.1}", s.percentage)),
            rating_cell(s.overall_rating),
        ];
        row.extend(
            s.section_scores
                .iter()
                .map(|sec| Cell::new(format!("{:.1}/{:.1}", sec.score, sec.max_score))),
        );
        row.push(Cell::new(format!("{:.2}", s.average_section_rating())));
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_group_averages(averages: &GroupAverages) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Section").add_attribute(Attribute::Bold),
        Cell::new("Average").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=1);

    for (label, value) in averages.iter() {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", value)),
        ]);
    }
    println!("{}", table);
}

pub fn print_generate_summary(summary: &GenerateSummary) {
    println!("✅ Processed {} students", summary.students);
    println!("💾 Output: {}", summary.output_path.display());
}
