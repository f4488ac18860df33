use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use scoreforge::config::Config;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding a full or partial layout config.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the workbook and write the report workbook.
    Generate(cmd::generate::GenerateArgs),
    /// Score the workbook and print the results without writing anything.
    Check(cmd::check::CheckArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Flags live in the subcommand's matches, not the root's.
    let (cli_config, sub_name) = match &cli.command {
        Commands::Generate(args) => (&args.config, "generate"),
        Commands::Check(args) => (&args.config, "check"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("❌ Missing arguments for '{}'", sub_name);
        process::exit(2);
    };

    let config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ {}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };

    let outcome = match cli.command {
        Commands::Generate(args) => cmd::generate::run(&args, &config),
        Commands::Check(args) => cmd::check::run(&args, &config),
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        process::exit(1);
    }
}
