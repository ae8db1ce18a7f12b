use anyhow::{Context, Result};
use argo_core::{
    export,
    generator::{DataGenerator, DEFAULT_SEED},
    responder::QueryProcessor,
};
use argo_schemas::profile::Parameter;
use clap::{Parser, Subcommand, ValueEnum};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::filter::LevelFilter;

mod config;
mod map;
mod plotting;
mod shell;

#[derive(Parser, Debug)]
#[command(version, about = "Ask plain-English questions about synthetic ARGO float data", long_about = None)]
struct Cli {
    /// Directory holding catalog.yaml and/or intents.yaml
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,

    /// Seed for the synthetic data stream
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read questions from stdin until EOF or `quit`
    Interactive {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the quick-select questions
    Samples,
    /// Show the loaded catalog
    Status,
    /// Render the surface time series of one float
    History {
        unit_id: String,
        #[arg(long, default_value_t = 6)]
        count: usize,
        #[arg(long, value_enum, default_value_t = ParameterArg::Temperature)]
        parameter: ParameterArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write every float's recent profiles as a flat CSV table
    Export {
        #[arg(long, default_value = "data/sample_argo_data.csv")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ParameterArg {
    Temperature,
    Salinity,
}

impl From<ParameterArg> for Parameter {
    fn from(arg: ParameterArg) -> Self {
        match arg {
            ParameterArg::Temperature => Parameter::Temperature,
            ParameterArg::Salinity => Parameter::Salinity,
        }
    }
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let kb = config::KnowledgeBase::load(cli.knowledge_base.as_deref())?;
    let generator = DataGenerator::new(kb.catalog.clone(), cli.seed);

    match cli.command {
        Command::Ask { query, out } => {
            let mut processor = QueryProcessor::new(kb.classifier, generator);
            let out_dir = out.unwrap_or_else(|| run_dir("query"));
            shell::answer_query(&mut processor, &query.join(" "), &out_dir)?;
        }
        Command::Interactive { out } => {
            let mut processor = QueryProcessor::new(kb.classifier, generator);
            let out_dir = out.unwrap_or_else(|| run_dir("session"));
            run_interactive(&mut processor, &out_dir)?;
        }
        Command::Samples => shell::print_samples(),
        Command::Status => shell::print_status(&kb.catalog),
        Command::History {
            unit_id,
            count,
            parameter,
            out,
        } => {
            let mut generator = generator;
            let out_dir = out.unwrap_or_else(|| run_dir("history"));
            let written = shell::render_history(
                &mut generator,
                &unit_id,
                count,
                parameter.into(),
                &out_dir,
            )?;
            match written {
                Some(path) => println!("Time series written to '{}'", path.display()),
                None => println!("No profiles available for float {}.", unit_id),
            }
        }
        Command::Export { path } => {
            let mut generator = generator;
            let rows = generator.export_flat_table();
            let written = export::write_csv(&rows, &path)
                .with_context(|| format!("Failed to export to {:?}", path))?;
            println!("Exported {} rows to '{}'", written, path.display());
        }
    }

    Ok(())
}

/// `./data/runs/<prefix>_<timestamp>`
fn run_dir(prefix: &str) -> PathBuf {
    PathBuf::from(format!(
        "./data/runs/{}_{}",
        prefix,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

fn run_interactive(processor: &mut QueryProcessor, out_dir: &Path) -> Result<()> {
    shell::print_samples();
    println!("Type a question, or `quit` to leave.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut asked = 0usize;
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read from stdin")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        asked += 1;
        let query_dir = out_dir.join(format!("query_{:03}", asked));
        shell::answer_query(processor, query, &query_dir)?;
    }

    println!("\nAnswered {} questions. Results are in '{}'", asked, out_dir.display());
    Ok(())
}
