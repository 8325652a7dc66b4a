use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use indicatif::{
    ProgressIterator,
    ProgressStyle,
};
use maldipipe::{
    PipelineConfig,
    ProcessingResult,
    RunSummary,
    SampleGroup,
    Spectrum,
    process_groups,
};
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::config::OutputConfig;
use crate::errors::CliError;

/// On-disk form of the spectra input: per group, replicates as plain
/// parallel arrays. Validation happens when the arrays are turned into
/// `Spectrum` values, one group at a time, so one malformed group never
/// blocks the rest of the file.
#[derive(Debug, Deserialize)]
pub struct SpectraFile {
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub id: String,
    pub replicates: Vec<RawReplicate>,
}

#[derive(Debug, Deserialize)]
pub struct RawReplicate {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

/// One line in `failures.json`.
#[derive(Debug, Serialize)]
struct FailureRecord {
    group: String,
    error: String,
}

/// Result collection written to `results.json`.
#[derive(Debug, Serialize)]
struct ResultsDocument<'a> {
    groups: std::collections::BTreeMap<&'a str, &'a ProcessingResult>,
}

pub fn load_groups(path: &Path) -> Result<(Vec<SampleGroup>, Vec<(String, String)>), CliError> {
    let file = File::open(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    let parsed: SpectraFile =
        serde_json::from_reader(file).map_err(|e| CliError::ParseError { msg: e.to_string() })?;

    let mut groups = Vec::with_capacity(parsed.groups.len());
    let mut skipped = Vec::new();
    for raw in parsed.groups {
        let mut replicates = Vec::with_capacity(raw.replicates.len());
        let mut bad = None;
        for replicate in raw.replicates {
            match Spectrum::try_new(replicate.mz, replicate.intensity) {
                Ok(s) => replicates.push(s),
                Err(e) => {
                    bad = Some(format!("{:?}", e));
                    break;
                }
            }
        }
        match bad {
            Some(reason) => {
                warn!(group = %raw.id, reason = %reason, "skipping malformed group");
                skipped.push((raw.id, reason));
            }
            None => groups.push(SampleGroup {
                id: raw.id,
                replicates,
            }),
        }
    }
    Ok((groups, skipped))
}

pub fn main_loop(
    groups: Vec<SampleGroup>,
    skipped: Vec<(String, String)>,
    config: &PipelineConfig,
    chunk_size: usize,
    out_path: &OutputConfig,
) -> Result<(), CliError> {
    let start = Instant::now();
    let mut summary = RunSummary::default();

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap();
    for chunk in groups.chunks(chunk_size.max(1)).progress_with_style(style) {
        let chunk_summary = process_groups(chunk, config)?;
        summary.results.extend(chunk_summary.results);
        summary.failures.extend(chunk_summary.failures);
    }

    let mut failures: Vec<FailureRecord> = skipped
        .into_iter()
        .map(|(group, error)| FailureRecord { group, error })
        .collect();
    failures.extend(summary.failures.iter().map(|f| FailureRecord {
        group: f.group.clone(),
        error: format!("{:?}", f.error),
    }));

    write_json(
        &out_path.directory.join("results.json"),
        &ResultsDocument {
            groups: summary
                .results
                .iter()
                .map(|(id, r)| (id.as_str(), r))
                .collect(),
        },
    )?;
    write_json(&out_path.directory.join("failures.json"), &failures)?;

    let total_peaks: usize = summary.results.values().map(|r| r.peaks.len()).sum();
    info!(
        ok = summary.results.len(),
        failed = failures.len(),
        total_peaks,
        "wrote results to {:?}",
        out_path.directory
    );
    println!(
        "Processed {} groups ({} failed) in {:?}",
        summary.results.len() + failures.len(),
        failures.len(),
        start.elapsed()
    );
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), data)
        .map_err(|e| CliError::ParseError { msg: e.to_string() })
}
