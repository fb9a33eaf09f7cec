//! `aweft`: the ActivityWeft command-line interface.
//!
//! Provides three subcommands for working with ActivityStreams documents:
//!
//! - **`inspect`**: decode a document and print a human-readable outline.
//! - **`normalize`**: decode and re-encode a document, printing the JSON.
//! - **`check`**: verify that a document survives decode → encode → decode.
//!
//! All subcommands read JSON from a file path or from stdin (`-`). The
//! input may be a single document or an array of documents.

mod config;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use activityweft::{render, Entity, Registry};
use clap::{Parser, Subcommand};
use serde_json::Value;

use config::CliConfig;

/// aweft: ActivityWeft CLI
///
/// Inspect, normalize and round-trip check ActivityStreams documents.
#[derive(Parser)]
#[command(name = "aweft", version, about, long_about = None)]
struct Cli {
    /// Print JSON on a single line.
    #[arg(long, global = true, env = "AWEFT_COMPACT")]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one or more documents and print an outline of each.
    ///
    /// Pass `-` as FILE to read from stdin.
    Inspect {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Decode and re-encode documents, printing the resulting JSON.
    ///
    /// Unknown properties and values are carried through unchanged; the
    /// output always carries a `type`.
    ///
    /// Pass `-` as FILE to read from stdin.
    Normalize {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Check that documents round-trip through the codec.
    ///
    /// Each document is decoded, encoded, and decoded again; the two
    /// decoded entities must be equal. Exits 0 if all documents round-trip,
    /// 1 otherwise.
    ///
    /// Pass `-` as FILE to read from stdin.
    Check {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },
}

fn main() {
    let config = CliConfig::from_env();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .init();

    let cli = Cli::parse();
    let compact = cli.compact;
    let registry = Registry::activity_streams();

    match cli.command {
        Command::Inspect { file } => {
            let entities = decode_all(&registry, &read_input(&file));
            for (i, entity) in entities.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render::render_entity(entity));
            }
        }

        Command::Normalize { file } => {
            let entities = decode_all(&registry, &read_input(&file));
            let mut docs = Vec::with_capacity(entities.len());
            for entity in &entities {
                docs.push(
                    entity
                        .to_json_with(&registry)
                        .unwrap_or_else(|e| fatal(&format!("failed to encode: {}", e))),
                );
            }
            let out = if docs.len() == 1 {
                docs.remove(0)
            } else {
                Value::Array(docs)
            };
            print_json(&out, compact);
        }

        Command::Check { file } => {
            let entities = decode_all(&registry, &read_input(&file));
            let mut all_ok = true;
            for (i, entity) in entities.iter().enumerate() {
                if let Err(msg) = round_trip(&registry, entity) {
                    if entities.len() == 1 {
                        eprintln!("error: {}", msg);
                    } else {
                        eprintln!("error in document {}: {}", i, msg);
                    }
                    all_ok = false;
                }
            }
            if all_ok {
                if entities.len() == 1 {
                    println!("round-trip ok");
                } else {
                    println!("all {} documents round-trip", entities.len());
                }
            } else {
                process::exit(1);
            }
        }
    }
}

/// Encode `entity` and decode the result again, requiring equality.
fn round_trip(registry: &Registry, entity: &Entity) -> Result<(), String> {
    let encoded = entity.to_json_with(registry).map_err(|e| format!("encode failed: {}", e))?;
    let decoded = registry
        .decode(&encoded)
        .map_err(|e| format!("re-decode failed: {}", e))?;
    if &decoded == entity {
        Ok(())
    } else {
        tracing::debug!(?decoded, ?entity, "round-trip mismatch");
        Err(format!(
            "{} does not survive a round-trip",
            entity.kind().name
        ))
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Parse the input as an array of documents or a single document and
/// decode each one.
fn decode_all(registry: &Registry, json: &str) -> Vec<Entity> {
    let parsed: Value = serde_json::from_str(json)
        .unwrap_or_else(|e| fatal(&format!("input is not valid JSON: {}", e)));
    let docs = match parsed {
        Value::Array(docs) => {
            if docs.is_empty() {
                fatal("input contains an empty array, nothing to process");
            }
            docs
        }
        single => vec![single],
    };
    docs.iter()
        .enumerate()
        .map(|(i, doc)| {
            registry.decode(doc).unwrap_or_else(|e| {
                if docs.len() == 1 {
                    fatal(&format!("failed to decode document: {}", e))
                } else {
                    fatal(&format!("failed to decode document {}: {}", i, e))
                }
            })
        })
        .collect()
}

fn print_json(value: &Value, compact: bool) {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    println!(
        "{}",
        text.unwrap_or_else(|e| fatal(&format!("failed to print JSON: {}", e)))
    );
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("aweft: {}", msg);
    process::exit(2);
}
