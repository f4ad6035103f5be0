use crate::model::{Status, StudentRecord, Subject};
use crate::rules::derive_status;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const NO_DATA_MESSAGE: &str = "No student data available.";

/// Matplotlib's Set2 palette, cycled across bars.
const BAR_PALETTE: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", NO_DATA_MESSAGE)]
pub struct EmptyInputError;

/// Round half away from zero to `places` decimals.
pub fn round_half_up(x: f64, places: u32) -> f64 {
    let f = 10f64.powi(places as i32);
    (x * f).round() / f
}

pub fn average_per_subject(records: &[StudentRecord]) -> BTreeMap<Subject, f64> {
    let mut acc: BTreeMap<Subject, (f64, usize)> = BTreeMap::new();
    for r in records {
        let e = acc.entry(r.subject).or_insert((0.0, 0));
        e.0 += r.marks;
        e.1 += 1;
    }
    acc.into_iter()
        .map(|(s, (sum, n))| (s, sum / n as f64))
        .collect()
}

/// `None` means no data.
pub fn overall_average(records: &[StudentRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.marks).sum();
    Some(sum / records.len() as f64)
}

pub fn pass_percentage(records: &[StudentRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let counts = status_counts(records);
    counts.pass as f64 / records.len() as f64 * 100.0
}

/// First record holding the maximal marks, in input order.
pub fn top_scorer(records: &[StudentRecord]) -> Result<&StudentRecord, EmptyInputError> {
    let mut best: Option<&StudentRecord> = None;
    for r in records {
        match best {
            Some(b) if r.marks <= b.marks => {}
            _ => best = Some(r),
        }
    }
    best.ok_or(EmptyInputError)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "Pass")]
    pub pass: usize,
    #[serde(rename = "Fail")]
    pub fail: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Pass => self.pass,
            Status::Fail => self.fail,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail
    }
}

/// Counts by status recomputed from marks, ignoring whatever a record carries.
pub fn status_counts(records: &[StudentRecord]) -> StatusCounts {
    let mut out = StatusCounts::default();
    for r in records {
        match derive_status(r.marks) {
            Status::Pass => out.pass += 1,
            Status::Fail => out.fail += 1,
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub id: i64,
    pub name: String,
    pub subject: Subject,
    pub marks: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAverage {
    pub subject: Subject,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub rows: Vec<SummaryRow>,
    pub per_subject_averages: Vec<SubjectAverage>,
    pub overall_average: f64,
    pub pass_percentage: f64,
    pub top_scorer: StudentRecord,
    pub status_counts: StatusCounts,
}

pub fn summarize(records: &[StudentRecord]) -> Result<AnalyticsSummary, EmptyInputError> {
    let top = top_scorer(records)?.clone();
    let overall = overall_average(records).ok_or(EmptyInputError)?;

    let rows = records
        .iter()
        .map(|r| SummaryRow {
            id: r.id,
            name: r.name.clone(),
            subject: r.subject,
            marks: r.marks,
            status: derive_status(r.marks),
        })
        .collect();

    Ok(AnalyticsSummary {
        rows,
        per_subject_averages: subject_averages(records),
        overall_average: overall,
        pass_percentage: pass_percentage(records),
        top_scorer: top,
        status_counts: status_counts(records),
    })
}

/// Per-subject means ordered by subject name, the order both the summary
/// table and the bar chart present.
fn subject_averages(records: &[StudentRecord]) -> Vec<SubjectAverage> {
    let mut out: Vec<SubjectAverage> = average_per_subject(records)
        .into_iter()
        .map(|(subject, average)| SubjectAverage { subject, average })
        .collect();
    out.sort_by(|a, b| a.subject.as_str().cmp(b.subject.as_str()));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub subject: Subject,
    pub average: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub label: Status,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub bar: BarChart,
    pub pie: PieChart,
}

pub fn chart_data(records: &[StudentRecord]) -> Result<ChartData, EmptyInputError> {
    if records.is_empty() {
        return Err(EmptyInputError);
    }

    let bars = subject_averages(records)
        .into_iter()
        .enumerate()
        .map(|(i, a)| Bar {
            subject: a.subject,
            average: a.average,
            color: BAR_PALETTE[i % BAR_PALETTE.len()],
        })
        .collect();

    // Largest slice first; on a tie Pass stays ahead of Fail.
    let counts = status_counts(records);
    let total = counts.total() as f64;
    let mut statuses = [Status::Pass, Status::Fail];
    statuses.sort_by(|a, b| counts.get(*b).cmp(&counts.get(*a)));
    let slices = statuses
        .into_iter()
        .filter(|s| counts.get(*s) > 0)
        .map(|s| PieSlice {
            label: s,
            count: counts.get(s),
            percent: round_half_up(counts.get(s) as f64 / total * 100.0, 1),
        })
        .collect();

    Ok(ChartData {
        bar: BarChart {
            title: "Subject vs Avg",
            x_label: "Subject",
            y_label: "Avg Marks",
            bars,
        },
        pie: PieChart {
            title: "Pass/Fail Ratio",
            slices,
        },
    })
}
