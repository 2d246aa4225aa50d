use std::path::{Path, PathBuf};
use std::process::ExitCode;

use avldb::{generate, storage, StorageError, Tree};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "avldb")]
#[command(about = "A keyed record store backed by an AVL tree")]
struct Args {
    /// The database file to work on
    #[arg(long, env = "AVLDB_DATABASE", default_value = "database.json")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new record
    Insert { key: i32, value: String },
    /// Look up a record and report how many comparisons it took
    Search { key: i32 },
    /// Replace the value of an existing record
    Edit { key: i32, value: String },
    /// Delete a record
    Remove { key: i32 },
    /// Print the number of records
    Count,
    /// Print every record in key order
    List,
    /// Print every node in pre-order with its height and children
    Export,
    /// Replace the database with generated records keyed 1..=COUNT
    Generate {
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Command {
    /// Whether running the command can change the database.
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Insert { .. } | Self::Edit { .. } | Self::Remove { .. } | Self::Generate { .. }
        )
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avldb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    // Errors have already been logged by the time they get here.
    match execute(&args.database, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Loads the database, runs `command` on it, and saves it if the tree changed.
///
/// A database that exists but can't be read is never written to: read-only commands see an empty
/// tree and mutating commands are refused.
fn execute(database: &Path, command: Command) -> Result<(), StorageError> {
    let mut tree = match storage::try_load(database) {
        Ok(tree) => tree,
        Err(e) if command.mutates() => {
            tracing::error!("refusing to modify unreadable database: {e}");
            return Err(e);
        }
        Err(e) => {
            tracing::warn!("failed to load database, showing it as empty: {e}");
            run(command, &mut Tree::new());
            return Ok(());
        }
    };
    tracing::info!("opened {} with {} records", database.display(), tree.len());

    if run(command, &mut tree) {
        storage::save(&tree, database)?;
        tracing::info!("saved {} records to {}", tree.len(), database.display());
    }
    Ok(())
}

/// Runs a single command against `tree`, printing its outcome. Returns whether the tree changed.
fn run(command: Command, tree: &mut Tree) -> bool {
    match command {
        Command::Insert { key, value } => {
            let inserted = tree.insert(key, value);
            if inserted {
                println!("Inserted record {key}.");
            } else {
                println!("A record with key {key} already exists.");
            }
            inserted
        }
        Command::Search { key } => {
            let search = tree.search(key);
            match search.value() {
                Some(value) => println!(
                    "Found {key}: {value:?} ({} comparisons)",
                    search.comparisons()
                ),
                None => println!(
                    "Key {key} not found ({} comparisons)",
                    search.comparisons()
                ),
            }
            false
        }
        Command::Edit { key, value } => {
            let edited = tree.edit(key, value);
            if edited {
                println!("Updated record {key}.");
            } else {
                println!("Key {key} not found.");
            }
            edited
        }
        Command::Remove { key } => {
            let removed = tree.remove(key);
            if removed {
                println!("Removed record {key}.");
            } else {
                println!("Key {key} not found.");
            }
            removed
        }
        Command::Count => {
            println!("{}", tree.len());
            false
        }
        Command::List => {
            for (key, value) in &*tree {
                println!("{key}\t{value}");
            }
            false
        }
        Command::Export => {
            for node in tree.export() {
                println!(
                    "{}\t{:?}\theight={}\tleft={}\tright={}",
                    node.key, node.value, node.height, node.has_left, node.has_right
                );
            }
            false
        }
        Command::Generate { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            match generate::generate(count, &mut rng) {
                Ok(generated) => {
                    *tree = generated;
                    println!("Generated {} records.", tree.len());
                    true
                }
                Err(e) => {
                    println!("Cannot generate records: {e}");
                    false
                }
            }
        }
    }
}
