//! `wjson` CLI: check, reformat, and inspect JSON documents in any byte encoding.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | wjson check
//!
//! # Validate a Latin-1 file
//! wjson check -i data.json -e latin1
//!
//! # Canonical compact form, transcoded from Shift_JIS to UTF-8
//! wjson format -i sjis.json -e Shift_JIS --output-encoding UTF-8 -o utf8.json
//!
//! # Pretty-print
//! wjson format --pretty -i data.json
//!
//! # Node counts and nesting depth
//! wjson stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use wjson_core::{TextCodec, Value, WideString, DEFAULT_ENCODING};

#[derive(Parser)]
#[command(
    name = "wjson",
    version,
    about = "Encoding-aware JSON checker and formatter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document and report the type of its top-level value
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Byte encoding of the input
        #[arg(short, long, default_value = DEFAULT_ENCODING)]
        encoding: String,
    },
    /// Re-encode a document in canonical compact (or pretty) form
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Byte encoding of the input
        #[arg(short, long, default_value = DEFAULT_ENCODING)]
        encoding: String,
        /// Byte encoding of the output (defaults to the input encoding)
        #[arg(long)]
        output_encoding: Option<String>,
        /// Indent nested containers instead of writing compact output
        #[arg(long)]
        pretty: bool,
    },
    /// Show node counts per type, nesting depth, and input size
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Byte encoding of the input
        #[arg(short, long, default_value = DEFAULT_ENCODING)]
        encoding: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input, encoding } => {
            let bytes = read_input(input.as_deref())?;
            let value = parse(&bytes, &encoding)?;
            println!("valid {}", value.value_type());
        }
        Commands::Format {
            input,
            output,
            encoding,
            output_encoding,
            pretty,
        } => {
            let bytes = read_input(input.as_deref())?;
            let value = parse(&bytes, &encoding)?;
            let target = output_encoding.as_deref().unwrap_or(&encoding);

            let formatted = if pretty {
                let text = serde_json::to_string_pretty(&value)
                    .context("Failed to pretty-print JSON")?;
                let mut codec = TextCodec::new(target)
                    .with_context(|| format!("Unsupported output encoding: {target}"))?;
                codec
                    .encode(WideString::from(text).as_units())
                    .with_context(|| format!("Failed to encode output as {target}"))?
            } else {
                wjson_core::encode_with_encoding(&value, target)
                    .with_context(|| format!("Failed to encode output as {target}"))?
            };

            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Stats { input, encoding } => {
            let bytes = read_input(input.as_deref())?;
            let value = parse(&bytes, &encoding)?;
            let stats = Stats::collect(&value);
            println!("Input size: {} bytes", bytes.len());
            println!("Max depth:  {}", stats.max_depth);
            println!("Nodes:      {}", stats.total());
            println!("  null:     {}", stats.nulls);
            println!("  boolean:  {}", stats.booleans);
            println!("  integer:  {}", stats.integers);
            println!("  float:    {}", stats.floats);
            println!("  string:   {}", stats.strings);
            println!("  list:     {}", stats.lists);
            println!("  object:   {}", stats.objects);
        }
    }

    Ok(())
}

fn parse(bytes: &[u8], encoding: &str) -> Result<Value> {
    wjson_core::decode_with_encoding(bytes, encoding)
        .with_context(|| format!("Failed to decode {encoding} JSON"))
}

/// Node counts per value type. Depth counts enclosing containers, so a
/// scalar document has depth 0 and `[[]]` has depth 2.
#[derive(Debug, Default)]
struct Stats {
    nulls: usize,
    booleans: usize,
    integers: usize,
    floats: usize,
    strings: usize,
    lists: usize,
    objects: usize,
    max_depth: usize,
}

impl Stats {
    fn collect(value: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(value, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.nulls += 1,
            Value::Boolean(_) => self.booleans += 1,
            Value::Integer(_) => self.integers += 1,
            Value::Float(_) => self.floats += 1,
            Value::String(_) => self.strings += 1,
            Value::List(items) => {
                self.lists += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(members) => {
                self.objects += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in members.values() {
                    self.visit(item, depth + 1);
                }
            }
        }
    }

    fn total(&self) -> usize {
        self.nulls
            + self.booleans
            + self.integers
            + self.floats
            + self.strings
            + self.lists
            + self.objects
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
