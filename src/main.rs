extern crate tokio;

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use nametag::Tagger;
use nametag_repo::{
    batch,
    cli::{Cli, Command},
    config::Config,
    error::Error,
    read,
    report::{self, LookupReport, TableSummary, TagReport},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::resolve(&cli).await?;
    let table = Arc::new(read::load_tables(&config.tables, config.case).await?);

    match &cli.command {
        Command::Lookup(lookup) => {
            for token in &lookup.tokens {
                let report = LookupReport {
                    token,
                    found: table.lookup(token),
                };
                emit(cli.json, &report, LookupReport::render)?;
            }
        }

        Command::Tag(tag) => {
            let mut tagger = Tagger::new(&table);

            for name in &tag.names {
                let tagged = tagger.tag_str(name);
                let report = TagReport {
                    input: name,
                    tagged: &tagged,
                };
                emit(cli.json, &report, TagReport::render)?;
            }
        }

        Command::Normalize(normalize) => {
            let text = read::read_to_string(&normalize.input).await?;
            let threads = config.threads;

            info!(
                input = %normalize.input.display(),
                threads = threads.get(),
                "Normalizing names"
            );

            let table = Arc::clone(&table);
            let lines = tokio::task::spawn_blocking(move || batch::tag_lines(table, &text, threads))
                .await
                .map_err(|err| Error::Worker(err.to_string()))??;

            for line in &lines {
                emit(cli.json, line, report::render_line)?;
            }
        }

        Command::Check => {
            let summary = TableSummary::new(&table);
            emit(cli.json, &summary, TableSummary::render)?;
        }
    }

    Ok(())
}

fn emit<T: serde::Serialize>(json: bool, value: &T, render: fn(&T) -> String) -> Result<(), Error> {
    if json {
        println!("{}", report::to_json(value)?);
    } else {
        println!("{}", render(value));
    }

    Ok(())
}
