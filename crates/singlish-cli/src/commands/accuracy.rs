//! Conversion accuracy runs over a structured TOML corpus.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process;

use serde::{Deserialize, Serialize};
use singlish_core::Engine;

use super::convert_ops::{build_engine, EngineOptions};

#[derive(Debug, thiserror::Error)]
pub enum AccuracyError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse corpus TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no cases match the given filters")]
    NoCases,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCase {
    pub input: String,
    pub expected: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub status: AccuracyStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

/// Restrict a run to one tag and/or category.
#[derive(Debug, Default, Clone)]
pub struct CaseFilter {
    pub tag: Option<String>,
    pub category: Option<String>,
}

impl CaseFilter {
    fn admits(&self, case: &AccuracyCase) -> bool {
        if let Some(ref t) = self.tag {
            if !case.tags.contains(t) {
                return false;
            }
        }
        if let Some(ref cat) = self.category {
            if case.category != *cat {
                return false;
            }
        }
        true
    }
}

pub fn parse_corpus(content: &str) -> Result<AccuracyCorpus, AccuracyError> {
    Ok(toml::from_str(content)?)
}

pub fn load_corpus(path: &Path) -> Result<AccuracyCorpus, AccuracyError> {
    parse_corpus(&fs::read_to_string(path)?)
}

pub fn run(
    engine: &Engine,
    corpus: &AccuracyCorpus,
    filter: &CaseFilter,
) -> Result<AccuracyReport, AccuracyError> {
    let cases: Vec<&AccuracyCase> = corpus.cases.iter().filter(|c| filter.admits(c)).collect();
    if cases.is_empty() {
        return Err(AccuracyError::NoCases);
    }

    let results: Vec<AccuracyResult> = cases
        .into_iter()
        .map(|case| {
            let (actual, status) = if case.skip {
                (String::new(), AccuracyStatus::Skip)
            } else {
                let actual = engine.convert(&case.input);
                let status = if actual == case.expected {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                (actual, status)
            };
            AccuracyResult {
                input: case.input.clone(),
                expected: case.expected.clone(),
                actual,
                status,
                category: case.category.clone(),
                note: case.note.clone(),
            }
        })
        .collect();

    let count = |s: AccuracyStatus| results.iter().filter(|r| r.status == s).count();
    let (pass, fail, skip) = (
        count(AccuracyStatus::Pass),
        count(AccuracyStatus::Fail),
        count(AccuracyStatus::Skip),
    );
    let total = results.len();
    let tested = total - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = AccuracySummary {
        total,
        pass,
        fail,
        skip,
        pass_rate: format!("{:.1}%", rate),
    };
    Ok(AccuracyReport { results, summary })
}

/// Text report grouped by category. Passing cases are listed only when
/// `verbose` is set.
pub fn format_report(report: &AccuracyReport, verbose: bool) -> String {
    let mut out = String::new();
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (cat, group) in &grouped {
        let _ = writeln!(out, "\n=== {} ({} cases) ===", cat, group.len());
        for r in group {
            match r.status {
                AccuracyStatus::Pass => {
                    if verbose {
                        let _ = writeln!(out, "  \u{2713} {:?} \u{2192} {}", r.input, r.expected);
                    }
                }
                AccuracyStatus::Fail => {
                    let _ = writeln!(
                        out,
                        "  \u{2717} {:?} \u{2192} {} (got: {})",
                        r.input, r.expected, r.actual
                    );
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    let _ = writeln!(out, "  - {:?} [skip: {}]", r.input, reason);
                }
            }
        }
    }

    let s = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Summary ===");
    let _ = writeln!(out, "  Total:     {}", s.total);
    let _ = writeln!(out, "  Pass:      {:>3}", s.pass);
    let _ = writeln!(out, "  Fail:      {:>3}", s.fail);
    let _ = writeln!(out, "  Skip:      {:>3}", s.skip);
    let _ = writeln!(
        out,
        "  Pass rate: {} ({}/{})",
        s.pass_rate,
        s.pass,
        s.total - s.skip
    );
    out
}

pub fn accuracy_cmd(
    corpus_file: &str,
    filter: &CaseFilter,
    verbose: bool,
    json: bool,
    opts: &EngineOptions,
) {
    let engine = build_engine(opts);
    let report = load_corpus(Path::new(corpus_file))
        .and_then(|corpus| run(&engine, &corpus, filter))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("JSON serialization failed: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", format_report(&report, verbose));
    }

    if report.summary.fail > 0 {
        process::exit(1);
    }
}
