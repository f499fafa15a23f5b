use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use field_mutator_core::format::truncated_value_at;
use field_mutator_core::{
    from_value, get_fuzzing_strategies, large_values_strategy, repeated_character_strategy,
    replace_field_with_options, DiscriminatorSet, FieldAddress, FillerSet, MutationOptions,
    MutationStrategy, SchemaConstraints, StrategyKind,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "field-mutator")]
#[command(about = "Mutate string fields of JSON documents with invisible and unusual characters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one strategy to one field of a JSON document
    Mutate {
        /// Input JSON document
        input: PathBuf,

        /// Field path, e.g. `user.name`, `items[*].id`, `$['odd.key']`
        #[arg(short, long)]
        field: String,

        /// Mutation strategy
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Replace)]
        strategy: StrategyArg,

        /// Strategy payload (plain text unless --json-payload is set)
        #[arg(short, long)]
        payload: Option<String>,

        /// Parse the payload as JSON instead of using it as a string
        #[arg(long)]
        json_payload: bool,

        /// Shape the payload after the existing value (merge-fuzzing)
        #[arg(long)]
        merge: bool,

        /// Discriminator property names that must not be mutated
        #[arg(long = "discriminator")]
        discriminators: Vec<String>,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// List candidate strategies for a field from its schema constraints
    Strategies {
        /// JSON file holding the field's schema (type, format, minLength, maxLength, enum)
        input: PathBuf,

        /// Filler catalogue to splice into the generated base value
        #[arg(long, value_enum, default_value_t = FillerArg::Control)]
        fillers: FillerArg,

        /// Insert fillers without overwriting part of the base value
        #[arg(long)]
        no_maintain_size: bool,

        /// Also emit a replacement with a marked large string of about SIZE
        /// characters (20000 when SIZE is omitted)
        #[arg(long, value_name = "SIZE", num_args = 0..=1)]
        large: Option<Option<usize>>,

        /// Also emit a replacement repeating TEXT past the field's minLength
        #[arg(long, value_name = "TEXT")]
        repeat: Option<String>,

        /// Payload characters kept in each strategy's display text
        #[arg(long, value_name = "CHARS")]
        truncate_at: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Show the strategy inferred from an existing value
    Classify {
        /// The value to classify
        value: String,

        /// Parse the value as JSON instead of using it as a string
        #[arg(long)]
        json: bool,

        /// Payload characters kept in the display text
        #[arg(long, value_name = "CHARS")]
        truncate_at: Option<usize>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum StrategyArg {
    Replace,
    Prefix,
    Trail,
    Insert,
    Skip,
    Noop,
}

impl From<StrategyArg> for StrategyKind {
    fn from(val: StrategyArg) -> Self {
        match val {
            StrategyArg::Replace => StrategyKind::Replace,
            StrategyArg::Prefix => StrategyKind::Prefix,
            StrategyArg::Trail => StrategyKind::Trail,
            StrategyArg::Insert => StrategyKind::Insert,
            StrategyArg::Skip => StrategyKind::Skip,
            StrategyArg::Noop => StrategyKind::Noop,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FillerArg {
    Control,
    Separators,
    Emojis,
    MultiEmojis,
}

impl From<FillerArg> for FillerSet {
    fn from(val: FillerArg) -> Self {
        match val {
            FillerArg::Control => FillerSet::ControlChars,
            FillerArg::Separators => FillerSet::Separators,
            FillerArg::Emojis => FillerSet::SingleCodePointEmojis,
            FillerArg::MultiEmojis => FillerSet::MultiCodePointEmojis,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

/// A strategy as printed by the CLI: its serialized form plus the log rendering.
#[derive(Serialize)]
struct StrategyReport<'a> {
    #[serde(flatten)]
    strategy: &'a MutationStrategy,
    display: String,
}

impl<'a> StrategyReport<'a> {
    fn new(strategy: &'a MutationStrategy, options: &MutationOptions) -> Self {
        Self {
            strategy,
            display: truncated_value_at(strategy, options.truncate_at),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Mutate {
            input,
            field,
            strategy,
            payload,
            json_payload,
            merge,
            discriminators,
            output,
            format,
        } => {
            let document = fs::read_to_string(&input)
                .with_context(|| format!("Failed to open input file: {}", input.display()))?;

            let options = MutationOptions {
                merge_fuzzing: merge,
                ..MutationOptions::default()
            };

            let address = FieldAddress::parse(&field)
                .map_err(|e| anyhow::Error::from(e).context("Invalid field path"))?;
            let discriminators = DiscriminatorSet::new(discriminators);

            let strategy = if discriminators.contains_field(&address) {
                eprintln!("Warning: {field} is a discriminator field and will not be mutated.");
                MutationStrategy::skip().with_data("discriminator field")
            } else {
                build_strategy(strategy.into(), payload, json_payload)?
            };
            tracing::debug!(field = %address, strategy = %strategy, "mutating field");

            let result = replace_field_with_options(&document, &field, &strategy, &options)
                .map_err(|e| anyhow::Error::from(e).context("Mutation failed"))?;

            if result.is_empty() {
                eprintln!("Warning: input document is blank; nothing was mutated.");
            }

            write_json(&result, output.as_ref(), format)?;
        }
        Commands::Strategies {
            input,
            fillers,
            no_maintain_size,
            large,
            repeat,
            truncate_at,
            format,
        } => {
            let constraints: SchemaConstraints = {
                let file = File::open(&input)
                    .with_context(|| format!("Failed to open input file: {}", input.display()))?;
                let reader = BufReader::new(file);
                serde_json::from_reader(reader).with_context(|| {
                    format!("Failed to parse schema constraints from: {}", input.display())
                })?
            };

            let defaults = MutationOptions::default();
            let options = MutationOptions {
                maintain_size: !no_maintain_size,
                truncate_at: truncate_at.unwrap_or(defaults.truncate_at),
                ..defaults
            };
            let filler_set = FillerSet::from(fillers);
            let mut strategies =
                get_fuzzing_strategies(&constraints, filler_set.values(), options.maintain_size);
            if let Some(text) = repeat.as_deref() {
                strategies.push(repeated_character_strategy(Some(&constraints), text));
            }
            if let Some(size) = large {
                let size = size.unwrap_or(options.large_string_size);
                strategies.extend(large_values_strategy(size));
            }
            tracing::debug!(count = strategies.len(), "generated strategies");

            let reports: Vec<StrategyReport<'_>> = strategies
                .iter()
                .map(|s| StrategyReport::new(s, &options))
                .collect();
            write_json(&reports, None, format)?;
        }
        Commands::Classify {
            value,
            json,
            truncate_at,
        } => {
            let value: serde_json::Value = if json {
                serde_json::from_str(&value).context("Failed to parse value as JSON")?
            } else {
                serde_json::Value::String(value)
            };

            let defaults = MutationOptions::default();
            let options = MutationOptions {
                truncate_at: truncate_at.unwrap_or(defaults.truncate_at),
                ..defaults
            };

            let strategy = from_value(&value);
            let report = StrategyReport::new(&strategy, &options);
            tracing::debug!("{}", report.display);
            write_json(&report, None, OutputFormat::Pretty)?;
        }
    }

    Ok(())
}

fn build_strategy(
    kind: StrategyKind,
    payload: Option<String>,
    json_payload: bool,
) -> Result<MutationStrategy> {
    let strategy = match kind {
        StrategyKind::Replace => MutationStrategy::replace(),
        StrategyKind::Prefix => MutationStrategy::prefix(),
        StrategyKind::Trail => MutationStrategy::trail(),
        StrategyKind::Insert => MutationStrategy::insert(),
        StrategyKind::Skip => MutationStrategy::skip(),
        StrategyKind::Noop => MutationStrategy::noop(),
    };

    let Some(raw) = payload else {
        if kind != StrategyKind::Skip {
            anyhow::bail!("--payload is required for the {} strategy", kind.name());
        }
        return Ok(strategy);
    };

    let data = if json_payload {
        serde_json::from_str(&raw).context("Failed to parse --payload as JSON")?
    } else {
        serde_json::Value::String(raw)
    };
    Ok(strategy.with_data(data))
}

fn write_json<T: serde::Serialize + ?Sized>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
