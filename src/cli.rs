extern crate clap;

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nametag", version, about = "Resolve name prefixes against tag look-up tables")]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Tag table file; repeat to load several tables into one. Without any,
    /// the bundled name-prefix table is used.
    #[arg(long = "table", short = 't', global = true)]
    pub tables: Vec<PathBuf>,

    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Print results as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn threads(&self) -> Option<NonZeroUsize> {
        match &self.command {
            Command::Normalize(normalize) => normalize.threads,
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve tokens to their canonical form and tag.
    Lookup(Lookup),
    /// Tag name strings with the greedy tagger.
    Tag(Tag),
    /// Tag every line of a file using a pool of worker threads.
    Normalize(Normalize),
    /// Load the tables and print a summary.
    Check,
}

#[derive(Debug, Parser)]
pub struct Lookup {
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct Tag {
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct Normalize {
    pub input: PathBuf,

    #[arg(long, short = 'j')]
    pub threads: Option<NonZeroUsize>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_lookup() {
        let cli = Cli::parse_from(["nametag", "lookup", "-t", "prefix.tbl", "dela", "mac"]);

        match &cli.command {
            Command::Lookup(lookup) => assert_eq!(lookup.tokens, ["dela", "mac"]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.tables.len(), 1);
        assert!(cli.threads().is_none());
    }

    #[test]
    fn test_cli_lookup_requires_tokens() {
        assert!(Cli::try_parse_from(["nametag", "lookup"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_threads() {
        assert!(Cli::try_parse_from(["nametag", "normalize", "names.txt", "-j", "0"]).is_err());
    }
}
