//! Batch-instruction driver.
//!
//! The instruction stream is whitespace-separated: each batch opens with a
//! `# <n>` header, followed by exactly `n` `I <key>` inserts and any number
//! of `F <key>` finds. Every batch runs against a fresh tree; for each batch
//! with at least one find the driver reports the declared batch size and the
//! average lookup path length (integer division), the only externally
//! observable artifact of running the tree at the application boundary.

use std::{
    fmt::Display,
    io::{Read, Write},
    str::FromStr,
};

use tracing::debug;

use crate::{
    error::{DriverError, Error, Result},
    tree::{SplayPolicy, SplayTree},
};

/// One parsed batch: the keys to insert, then the keys to probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<K> {
    pub inserts: Vec<K>,
    pub finds: Vec<K>,
}

/// Aggregated result of running one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchReport {
    pub batch_size: usize,
    pub average_find_length: usize,
}

/// Parses a complete instruction stream into batches.
pub fn parse_batches<K>(input: &str) -> Result<Vec<Batch<K>>>
where
    K: FromStr,
    K::Err: Display,
{
    let mut tokens = input.split_whitespace().peekable();
    let mut batches = Vec::new();

    while let Some(token) = tokens.next() {
        if token != "#" {
            return Err(DriverError::ExpectedHeader(token.to_string()).into());
        }
        let count: usize = tokens
            .next()
            .ok_or(DriverError::MissingBatchSize)?
            .parse()?;

        // `count` is untrusted input; cap the preallocation.
        let mut inserts = Vec::with_capacity(count.min(1024));
        for found in 0..count {
            match tokens.next() {
                Some("I") => {
                    let key = tokens.next().ok_or(DriverError::MissingKey("I".into()))?;
                    inserts.push(parse_key(key)?);
                }
                Some(other) => {
                    return Err(DriverError::UnknownInstruction(other.to_string()).into())
                }
                None => {
                    return Err(DriverError::TruncatedBatch {
                        expected: count,
                        found,
                    }
                    .into())
                }
            }
        }

        let mut finds = Vec::new();
        while tokens.peek() == Some(&"F") {
            tokens.next();
            let key = tokens.next().ok_or(DriverError::MissingKey("F".into()))?;
            finds.push(parse_key(key)?);
        }

        batches.push(Batch { inserts, finds });
    }

    Ok(batches)
}

/// Runs each batch on a fresh tree with the chosen policy and aggregates the
/// lookup path lengths. Batches without finds produce no report.
pub fn run_batches<K, P>(batches: &[Batch<K>]) -> Vec<BatchReport>
where
    K: Ord + Clone,
    P: SplayPolicy,
{
    let mut reports = Vec::new();
    for batch in batches {
        debug!(
            inserts = batch.inserts.len(),
            finds = batch.finds.len(),
            "running batch"
        );

        let mut tree: SplayTree<K, P> = SplayTree::new();
        for key in &batch.inserts {
            tree.insert(key.clone());
        }

        if batch.finds.is_empty() {
            continue;
        }
        let mut total_length = 0usize;
        for key in &batch.finds {
            let _ = tree.find(key);
            total_length += tree.length_of_last_find();
        }
        reports.push(BatchReport {
            batch_size: batch.inserts.len(),
            average_find_length: total_length / batch.finds.len(),
        });
    }
    reports
}

/// Reads a whole instruction stream, runs it, and writes one
/// `<batch_size> <average_find_length>` line per reporting batch.
pub fn process<K, P, R, W>(mut reader: R, mut writer: W) -> Result<()>
where
    K: FromStr + Ord + Clone,
    K::Err: Display,
    P: SplayPolicy,
    R: Read,
    W: Write,
{
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let batches = parse_batches::<K>(&input)?;
    debug!(batches = batches.len(), "parsed instruction stream");

    for report in run_batches::<K, P>(&batches) {
        writeln!(writer, "{} {}", report.batch_size, report.average_find_length)?;
    }
    Ok(())
}

fn parse_key<K>(token: &str) -> Result<K>
where
    K: FromStr,
    K::Err: Display,
{
    token
        .parse()
        .map_err(|error| Error::InvalidKey(format!("`{token}`: {error}")))
}
