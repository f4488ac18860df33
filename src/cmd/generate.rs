use crate::reports;
use clap::Args;
use scoreforge::config::Config;
use scoreforge::error::SfResult;
use scoreforge::pipeline;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Workbook (.xlsx/.xlsm/.xls/.ods) or a directory of per-sheet CSV files.
    pub input: PathBuf,

    /// Defaults to `<input stem><suffix>.xlsx` next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs, config: &Config) -> SfResult<()> {
    let summary = pipeline::generate(&args.input, args.output.as_deref(), config)?;
    reports::print_generate_summary(&summary);
    Ok(())
}
