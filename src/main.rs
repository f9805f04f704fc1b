//! Profile resolver CLI
//!
//! Entry point for the `profile-resolve` command-line tool.

use clap::{Parser, Subcommand};
use profile_hierarchy::{ProfileChain, ProfileHandler, ProfileIndex, ProfileStore};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Group used when `--group` is not given
const DEFAULT_GROUP: &str = "Profiles";

/// Exit code for `--strict` resolutions that reported issues
const EXIT_ISSUES: i32 = 2;

#[derive(Parser)]
#[command(name = "profile-resolve")]
#[command(about = "Resolve inherited configuration profiles", version)]
struct Cli {
    /// Path to the profile store (TOML)
    #[arg(long, short = 's', env = "PROFILE_STORE", global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged settings of a profile
    Resolve {
        /// Profile identifier
        id: String,

        /// Profile group to look the profile up in
        #[arg(long, short = 'g', default_value = DEFAULT_GROUP)]
        group: String,

        /// Output in JSON format, including chain and issues
        #[arg(long)]
        json: bool,

        /// Drop the PARENT key from the merged settings
        #[arg(long)]
        strip_parent: bool,

        /// Exit with a non-zero code if any issue was reported
        #[arg(long)]
        strict: bool,
    },

    /// Print the parent chain of a profile, root first
    Chain {
        /// Profile identifier
        id: String,

        /// Profile group to look the profile up in
        #[arg(long, short = 'g', default_value = DEFAULT_GROUP)]
        group: String,
    },

    /// List groups in the store
    Groups {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let store = load_store(cli.store);

    match cli.command {
        Commands::Resolve {
            id,
            group,
            json,
            strip_parent,
            strict,
        } => {
            run_resolve(store, &id, group, json, strip_parent, strict);
        }
        Commands::Chain { id, group } => {
            run_chain(&store, &id, &group);
        }
        Commands::Groups { json } => {
            run_groups(&store, json);
        }
    }
}

fn load_store(path: Option<PathBuf>) -> ProfileStore {
    let Some(path) = path else {
        eprintln!("No profile store given (use --store or PROFILE_STORE)");
        process::exit(1);
    };

    match ProfileStore::load(&path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading profile store {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn run_resolve(
    store: ProfileStore,
    id: &str,
    group: String,
    json_output: bool,
    strip_parent: bool,
    strict: bool,
) {
    let handler = ProfileHandler::new(store, group);
    let mut resolution = handler.resolve(id);
    if strip_parent {
        resolution.profile = resolution.profile.without_parent();
    }

    if json_output {
        match resolution.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        for (key, value) in resolution.profile.iter() {
            println!("{} = {}", key, value);
        }
    }

    if strict && !resolution.is_clean() {
        process::exit(EXIT_ISSUES);
    }
}

fn run_chain(store: &ProfileStore, id: &str, group: &str) {
    let index = match ProfileIndex::build(store, group) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let (chain, issue) = ProfileChain::resolve(&index, id);
    for (depth, name) in chain.names().iter().enumerate() {
        println!("{}{}", "  ".repeat(depth), name);
    }

    if let Some(issue) = issue {
        eprintln!("{}", issue);
        process::exit(1);
    }
}

fn run_groups(store: &ProfileStore, json_output: bool) {
    let groups = store.groups();

    if json_output {
        let output: Vec<serde_json::Value> = groups
            .iter()
            .map(|(name, count)| {
                serde_json::json!({
                    "group": name,
                    "profiles": count,
                })
            })
            .collect();

        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else if groups.is_empty() {
        println!("No groups in store");
    } else {
        for (name, count) in groups {
            println!("{:<24} {} profile(s)", name, count);
        }
    }
}
