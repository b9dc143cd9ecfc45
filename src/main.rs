use clap::{Parser, ValueEnum};
use log::{debug, error};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use macro_import::config::ImportConfig;
use macro_import::{ImportError, ImportResult, MacroImporter, OutputFormat};

#[derive(Parser)]
#[command(name = "macro-import")]
#[command(version)]
#[command(about = "Parse a pasted nutrition table into macro records", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Strict mode: exit with error on the first malformed row
    #[arg(long)]
    strict: bool,

    /// Group the parsed rows into a recipe with this name
    #[arg(short, long)]
    recipe: Option<String>,

    /// Log the recipe as one row scaled by this portion multiplier
    #[arg(short, long, requires = "recipe")]
    portion: Option<f64>,

    /// Print skipped rows to stderr
    #[arg(long)]
    report: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Entries,
    Json,
    Csv,
    Table,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Entries => OutputFormat::Entries,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
            Format::Table => OutputFormat::Table,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ImportError> {
    let config = ImportConfig::load()?;
    debug!("{:#?}", config);

    let text = match &cli.input_file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if cli.report {
        let parser = config.parser.to_parser();
        for skipped in parser.parse_with_report(&text).skipped {
            eprintln!(
                "skipped line {}: {} | {}",
                skipped.line_number, skipped.reason, skipped.content
            );
        }
    }

    let mut builder = MacroImporter::builder().config(config).text(text);
    if cli.strict {
        builder = builder.strict();
    }
    if let Some(format) = cli.format {
        builder = builder.format(format.into());
    }
    if let Some(name) = cli.recipe {
        builder = builder.recipe(name);
    }
    if let Some(portion) = cli.portion {
        builder = builder.portion(portion);
    }

    match builder.build()? {
        ImportResult::Entries { entries, totals } => {
            for entry in &entries {
                println!(
                    "{} | {} cal | {}g P | {}g F | {}g C | {}g Fiber",
                    entry.food_name,
                    entry.calories,
                    entry.protein,
                    entry.fat,
                    entry.carbs,
                    entry.fiber
                );
            }
            println!("Parsed {} items.", entries.len());
            println!("Total: {}", totals);
        }
        ImportResult::Recipe(recipe) => {
            println!("{}", recipe.name);
            for entry in &recipe.ingredients {
                println!("  {}", entry.to_table_line());
            }
            println!("Total: {}", recipe.totals);
        }
        ImportResult::LogEntry(entry) => {
            println!("{}", entry.to_table_line());
            println!("Total: {}", entry.macros());
        }
        ImportResult::Rendered(output) => println!("{}", output),
    }

    Ok(())
}
