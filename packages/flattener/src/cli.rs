//! Command-line interface for the flattener.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::{ProcessorConfig, DEFAULT_ATTRIBUTE_SEPARATOR, DEFAULT_SEPARATOR};
use crate::document::{IngestDocument, OrderedFields};
use crate::error::Result;
use crate::flatten::{FlattenStats, Flattener};
use crate::processor::XmlProcessor;
use crate::xml::parse_document;

/// XML Flatten - Turn XML documents into flat, path-keyed fields.
#[derive(Parser)]
#[command(name = "xml-flatten")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a raw XML file and print the resulting fields.
    Flatten {
        /// XML file to read ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Regular expression; fields whose key fully matches are dropped (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Separator between element names
        #[arg(long, default_value = DEFAULT_SEPARATOR)]
        separator: String,

        /// Separator between an element key and an attribute name
        #[arg(long, default_value = DEFAULT_ATTRIBUTE_SEPARATOR)]
        attribute_separator: String,

        /// Name appended to keys of leaf text values
        #[arg(long)]
        content_suffix: Option<String>,

        /// Keep surrounding whitespace in leaf text
        #[arg(long)]
        no_trim: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Lines)]
        format: OutputFormat,
    },

    /// Run the configured processor over a JSON document and print the result.
    Ingest {
        /// YAML processor configuration (field, exclude, ...)
        #[arg(short, long)]
        config: PathBuf,

        /// JSON document to process ("-" or omitted for stdin)
        document: Option<PathBuf>,

        /// Processor tag used in log output
        #[arg(long, default_value = "xml")]
        tag: String,
    },
}

/// How flattened fields are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key=value` line per field, in document order.
    Lines,
    /// A JSON object of all fields.
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Flatten {
            input,
            exclude,
            separator,
            attribute_separator,
            content_suffix,
            no_trim,
            format,
        } => {
            let mut config = ProcessorConfig::new("xml").with_exclude(exclude);
            config.separator = separator;
            config.attribute_separator = attribute_separator;
            config.content_suffix = content_suffix;
            config.trim_text = !no_trim;
            flatten_command(input.as_deref(), &config, format, &mut out)
        }
        Commands::Ingest {
            config,
            document,
            tag,
        } => ingest_command(&config, document.as_deref(), &tag, &mut out),
    }
}

/// Execute the flatten command.
fn flatten_command(
    input: Option<&Path>,
    config: &ProcessorConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    config.validate()?;
    let flattener = Flattener::from_config(config)?;

    let xml = read_input(input)?;
    if xml.is_empty() {
        eprintln!("{}", style("No XML content, nothing to flatten").yellow());
        return Ok(());
    }

    let root = parse_document(&xml)?;
    let mut fields = OrderedFields::new();
    let stats = flattener.flatten(&root, &mut fields);

    match format {
        OutputFormat::Lines => {
            for (key, value) in fields.iter() {
                writeln!(out, "{key}={value}")?;
            }
        }
        OutputFormat::Json => {
            let object: BTreeMap<_, _> = fields.into_pairs().into_iter().collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&object)?)?;
        }
    }

    print_summary(&stats);
    Ok(())
}

/// Execute the ingest command.
fn ingest_command(
    config_path: &Path,
    document: Option<&Path>,
    tag: &str,
    out: &mut impl Write,
) -> Result<()> {
    let config = ProcessorConfig::from_yaml_file(config_path)?;
    let processor = XmlProcessor::new(tag, &config)?;

    let mut doc = IngestDocument::from_json_str(&read_input(document)?)?;
    match processor.execute(&mut doc)? {
        Some(stats) => print_summary(&stats),
        None => eprintln!(
            "{} {}",
            style("No XML content in field").yellow(),
            style(processor.field()).cyan()
        ),
    }

    writeln!(out, "{}", doc.to_json_string()?)?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_summary(stats: &FlattenStats) {
    eprintln!(
        "{} {} fields from {} elements ({} excluded)",
        style("Flattened").green().bold(),
        stats.emitted,
        stats.elements,
        stats.excluded
    );
}
