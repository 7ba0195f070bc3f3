extern crate crossbeam_channel;

use std::{num::NonZeroUsize, sync::Arc, thread};

use crossbeam_channel::unbounded;
use nametag::{
    normalizer::{CanonicalReplacer, Lowercase, NormalizerPipeline},
    tokenizer::Tokenizer,
    CasePolicy, TagTable, TaggedWord, Tagger,
};
use serde::Serialize;
use tracing::debug;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaggedLine {
    pub line: usize,
    pub input: String,
    /// Input with every single-word variant replaced by its canonical form.
    pub normalized: String,
    pub tagged: Vec<TaggedWord>,
}

fn pipeline(table: &Arc<TagTable>) -> NormalizerPipeline {
    let mut pipeline = NormalizerPipeline::new();

    if table.case_policy() == CasePolicy::Lowercase {
        pipeline.insert(Box::new(Lowercase::new()));
    }
    pipeline.insert(Box::new(CanonicalReplacer::new(table.clone())));
    pipeline
}

/// Normalizes and tags every line on a pool of worker threads sharing one table.
///
/// Results come back in input order; blank lines are skipped but keep their
/// line numbers.
pub fn tag_lines(
    table: Arc<TagTable>,
    text: &str,
    threads: NonZeroUsize,
) -> Result<Vec<TaggedLine>, Error> {
    let (job_tx, job_rx) = unbounded::<(usize, String)>();
    let (result_tx, result_rx) = unbounded::<TaggedLine>();
    let normalizers = pipeline(&table);

    let workers = (0..threads.get())
        .map(|worker| {
            let table = table.clone();
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let mut normalizers = normalizers.clone();

            thread::Builder::new()
                .name(format!("nametag-worker-{worker}"))
                .spawn(move || {
                    let mut tokenizer = Tokenizer::default();
                    let tagger = Tagger::new(&table);
                    let mut count = 0usize;

                    for (line, input) in jobs.iter() {
                        let mut tokens = tokenizer.tokenize(&input);
                        let tagged = tagger.tag(&tokens);

                        normalizers.run(&mut tokens);
                        let normalized = tokens.join();
                        count += 1;

                        let output = TaggedLine {
                            line,
                            input,
                            normalized,
                            tagged,
                        };
                        if results.send(output).is_err() {
                            break;
                        }
                    }

                    debug!(worker, lines = count, "Worker finished");
                })
                .map_err(|error| Error::Worker(error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    drop(job_rx);
    drop(result_tx);

    for (index, input) in text.lines().enumerate() {
        if input.trim().is_empty() {
            continue;
        }

        job_tx
            .send((index + 1, input.to_string()))
            .map_err(|error| Error::Worker(error.to_string()))?;
    }
    drop(job_tx);

    let mut lines = result_rx.iter().collect::<Vec<_>>();

    for handle in workers {
        handle
            .join()
            .map_err(|_| Error::Worker("worker thread panicked".to_string()))?;
    }

    lines.sort_unstable_by_key(|tagged| tagged.line);
    Ok(lines)
}
