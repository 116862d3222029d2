use crate::armory::{GameVersion, Locale, Region};
use clap::{Args, Parser, Subcommand};

/// `Realmscribe` - World of Warcraft realm and character lookups.
#[derive(Parser, Debug)]
#[command(name = "realmscribe")]
#[command(author = "theonlyhennygod")]
#[command(version)]
#[command(about = "Look up realms and characters, and chronicle them.", long_about = None)]
pub struct Cli {
    /// Log at DEBUG level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Region and game version shared by every lookup.
#[derive(Args, Debug, Clone, Copy)]
pub struct Partition {
    /// Region (us, eu, kr, tw)
    #[arg(long, default_value = "us")]
    pub region: Region,

    /// Game version (retail, classic, classicera)
    #[arg(long = "version", default_value = "retail")]
    pub game_version: GameVersion,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain a bearer token and report whether it worked
    Token,

    /// List realms for a region and game version
    Realms {
        #[command(flatten)]
        partition: Partition,

        /// Locale for realm names (defaults to the configured locale)
        #[arg(long)]
        locale: Option<Locale>,

        /// Show the plain name/slug index instead of status details
        #[arg(long)]
        index: bool,
    },

    /// Show one realm's connected-realm group
    Realm {
        #[command(flatten)]
        partition: Partition,

        /// Realm slug, e.g. area-52
        slug: String,

        /// Also show a generated chronicle of the realm
        #[arg(long)]
        chronicle: bool,

        /// Generate a new chronicle even when one is cached
        #[arg(long, requires = "chronicle")]
        refresh: bool,
    },

    /// Show a character profile
    Character {
        #[command(flatten)]
        partition: Partition,

        /// Realm slug the character lives on
        realm_slug: String,

        /// Character name (case-insensitive)
        name: String,

        /// Also show a generated chronicle of the character
        #[arg(long)]
        chronicle: bool,

        /// Generate a new chronicle even when one is cached
        #[arg(long, requires = "chronicle")]
        refresh: bool,
    },

    /// Manage stored chronicles
    Summaries {
        #[command(subcommand)]
        summary_command: SummaryCommands,
    },
}

/// Stored chronicle subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SummaryCommands {
    /// List stored chronicle lists, or the entries of one list
    List {
        /// Storage key, e.g. aiSummary-US-area-52-list
        key: Option<String>,
    },
    /// Print one stored chronicle
    Show {
        key: String,
        /// Position in the list, 0 is newest
        #[arg(long, default_value = "0")]
        index: usize,
    },
    /// Delete one stored chronicle by position
    Delete { key: String, index: usize },
    /// Delete a whole list
    Clear { key: String },
}
