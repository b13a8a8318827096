use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use jmesq::engine::bridge::{HostBridge, driver};
use jmesq::engine::fetch::{DocumentSource, MemoryStore};
use jmesq::logging;
use jmesq::shared::config::{load_settings, load_settings_from};
use jmesq::{ResultKind, TypedResult};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "jmesq")]
#[command(about = "Run a JMESPath expression against one MongoDB document", long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults to $JMESQ_CONFIG or ./jmesq.toml
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a document and answer the query as a typed scalar
    Query(QueryArgs),
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Result type to coerce the processor output into
    #[arg(value_enum)]
    kind: Kind,

    /// MongoDB connection string
    #[arg(short, long, default_value = "mongodb://127.0.0.1:27017")]
    uri: String,

    #[arg(short, long)]
    database: String,

    #[arg(short = 'C', long)]
    collection: String,

    /// Document `_id` (ObjectId hex)
    #[arg(short, long)]
    id: String,

    /// Read documents from a JSON fixture `{db: {collection: {id: doc}}}` instead of MongoDB
    #[arg(long)]
    fixture: Option<String>,

    /// Report failures on stderr with exit code 1 instead of printing the sentinel
    #[arg(long)]
    strict: bool,

    /// JMESPath expression
    query: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    String,
    Integer,
    Float,
}

impl From<Kind> for ResultKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::String => ResultKind::String,
            Kind::Integer => ResultKind::Integer,
            Kind::Float => ResultKind::Float,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };

    match args.command {
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Query(query) => {
            logging::init_with(&settings.logging)?;
            let code = match &query.fixture {
                Some(path) => {
                    let store = MemoryStore::from_fixture_file(path)
                        .with_context(|| format!("loading fixture {}", path))?;
                    run(HostBridge::with_source(store, &settings), &query)
                }
                None => run(HostBridge::from_settings(&settings), &query),
            };
            driver::shutdown_with(&settings.driver);
            Ok(code)
        }
    }
}

fn run<S: DocumentSource>(host: HostBridge<S>, args: &QueryArgs) -> ExitCode {
    let kind = ResultKind::from(args.kind);
    info!(source = host.bridge().source().name(), %kind, "Running query");

    if args.strict {
        return match host.query(
            &args.uri,
            &args.database,
            &args.collection,
            &args.id,
            &args.query,
            kind,
        ) {
            Ok(value) => {
                println!("{}", value);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{} {}", e.sentinel(), e);
                ExitCode::FAILURE
            }
        };
    }

    let value = match kind {
        ResultKind::String => TypedResult::String(host.query_string(
            &args.uri,
            &args.database,
            &args.collection,
            &args.id,
            &args.query,
        )),
        ResultKind::Integer => TypedResult::Integer(host.query_integer(
            &args.uri,
            &args.database,
            &args.collection,
            &args.id,
            &args.query,
        )),
        ResultKind::Float => TypedResult::Float(host.query_float(
            &args.uri,
            &args.database,
            &args.collection,
            &args.id,
            &args.query,
        )),
    };
    println!("{}", value);
    ExitCode::SUCCESS
}
