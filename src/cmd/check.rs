use crate::reports;
use clap::Args;
use scoreforge::config::Config;
use scoreforge::error::SfResult;
use scoreforge::pipeline;
use scoreforge::workbook::load_snapshot;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,

    pub input: PathBuf,

    /// Print the scored run as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only show students whose name contains this text.
    #[arg(short, long)]
    pub student: Option<String>,
}

pub fn run(args: &CheckArgs, config: &Config) -> SfResult<()> {
    let snapshot = load_snapshot(&args.input)?;
    let mut result = pipeline::run(&snapshot, config)?;

    if let Some(ref filter) = args.student {
        let filter = filter.to_lowercase();
        result
            .students
            .retain(|s| s.name.to_lowercase().contains(&filter));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n🔎 === RUBRIC === 🔎");
    reports::print_rubric_report(&result.rubric);
    println!("\n📊 === STUDENTS === 📊");
    reports::print_student_report(&result.rubric, &result.students);
    println!("\n📈 === GROUP AVERAGES (5-point) === 📈");
    reports::print_group_averages(&result.averages);
    println!("\nChecked {} students", result.students.len());
    Ok(())
}
