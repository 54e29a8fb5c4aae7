//! Tabular input loading.
//!
//! Reads the first sheet of a spreadsheet (xlsx, xlsm, xlsb, xls, ods) or a
//! delimited text file (csv, tsv). The first row is a header; the first two
//! columns of every following row are taken as `(label, score)`.

use crate::error::{Result, RocError};
use crate::roc::Sample;
use calamine::{Data, Reader, open_workbook_auto};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Most distinct label values quoted in a non-binary labels error.
const MAX_REPORTED_LABELS: usize = 5;

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Spreadsheet,
    Delimited { delimiter: u8 },
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Delimited { delimiter: b',' }),
            "tsv" => Ok(Self::Delimited { delimiter: b'\t' }),
            "" => Err(RocError::input(format!(
                "cannot infer input format of {}: no file extension",
                path.display()
            ))),
            other => Err(RocError::input(format!(
                "unsupported input format '.{other}' for {}",
                path.display()
            ))),
        }
    }
}

/// A raw cell, normalized across input formats.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::String(s) => Cell::from_text(s),
            Data::Empty => Cell::Empty,
            other => Cell::Text(other.to_string()),
        }
    }
}

impl Cell {
    fn from_text(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Cell::Empty;
        }
        if let Ok(n) = s.parse::<f64>() {
            return Cell::Number(n);
        }
        match s.to_ascii_lowercase().as_str() {
            "true" => Cell::Number(1.0),
            "false" => Cell::Number(0.0),
            _ => Cell::Text(s.to_string()),
        }
    }
}

/// A ground-truth label as read from the file, before binarization.
#[derive(Debug, Clone)]
pub enum LabelValue {
    Number(f64),
    Text(String),
}

impl LabelValue {
    /// Numeric label with `-0.0` folded into `0.0`.
    pub fn number(n: f64) -> Self {
        Self::Number(if n == 0.0 { 0.0 } else { n })
    }
}

impl PartialEq for LabelValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LabelValue {}

impl PartialOrd for LabelValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LabelValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One `(label, score)` row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledScore {
    pub label: LabelValue,
    pub score: f64,
}

/// Which of the two label values counts as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositiveClass {
    /// The larger value (1 for 0/1 labels).
    #[default]
    Larger,
    Smaller,
}

/// The label values present in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryClasses {
    pub negative: Option<LabelValue>,
    pub positive: LabelValue,
}

/// The first two columns of the input table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub label_column: String,
    pub score_column: String,
    pub rows: Vec<LabeledScore>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct label values, smallest first.
    pub fn label_values(&self) -> Vec<LabelValue> {
        self.rows
            .iter()
            .map(|r| r.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Split the label values into negative and positive (larger value positive).
    pub fn classes(&self) -> Result<BinaryClasses> {
        let values = self.label_values();
        match values.as_slice() {
            [only] => Ok(BinaryClasses {
                negative: None,
                positive: only.clone(),
            }),
            [low, high] => Ok(BinaryClasses {
                negative: Some(low.clone()),
                positive: high.clone(),
            }),
            [] => Err(RocError::input("dataset has no rows")),
            _ => Err(RocError::NonBinaryLabels {
                count: values.len(),
                values: values
                    .iter()
                    .take(MAX_REPORTED_LABELS)
                    .map(ToString::to_string)
                    .collect(),
            }),
        }
    }

    /// Binarize the labels with the chosen positive-class convention.
    ///
    /// With a single label value present every sample is positive, which the
    /// ROC computation reports as degenerate.
    pub fn samples(&self, positive: PositiveClass) -> Result<Vec<Sample>> {
        let classes = self.classes()?;
        let positive_value = match (positive, classes.negative) {
            (PositiveClass::Larger, _) | (PositiveClass::Smaller, None) => classes.positive,
            (PositiveClass::Smaller, Some(negative)) => negative,
        };
        Ok(self
            .rows
            .iter()
            .map(|r| Sample::new(r.label == positive_value, r.score))
            .collect())
    }
}

/// Load the first two columns of a tabular file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let format = InputFormat::from_path(path)?;
    let table = match format {
        InputFormat::Spreadsheet => read_spreadsheet(path)?,
        InputFormat::Delimited { delimiter } => read_delimited(path, delimiter)?,
    };
    let dataset = build_dataset(table)?;
    // Reject a non-binary label column at load time.
    dataset.classes()?;
    tracing::debug!(
        path = %path.display(),
        rows = dataset.len(),
        label_column = %dataset.label_column,
        score_column = %dataset.score_column,
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Load a tabular file and binarize it with the larger label value positive.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    load_dataset(path)?.samples(PositiveClass::Larger)
}

/// Header row plus data rows, cells already normalized.
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| RocError::input(format!("failed to open {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RocError::input(format!("{} contains no worksheets", path.display())))?
        .map_err(|e| RocError::input(format!("failed to read first sheet: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(Cell::from).collect())
        .collect();
    Ok(Table { header, rows })
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RocError::input(format!("failed to open {}: {e}", path.display())))?;

    let header = reader
        .headers()
        .map_err(|e| RocError::input(format!("failed to read header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| RocError::input(format!("malformed row: {e}")))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(Table { header, rows })
}

fn build_dataset(table: Table) -> Result<Dataset> {
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);
    if width < 2 {
        return Err(RocError::input(format!(
            "expected at least 2 columns (label, score), found {width}"
        )));
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut kind: Option<(&'static str, usize)> = None;
    for (idx, cells) in table.rows.iter().enumerate() {
        if cells.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        let row_no = idx + 1;
        let label = match cells.first().unwrap_or(&Cell::Empty) {
            Cell::Number(n) => LabelValue::number(*n),
            Cell::Text(s) => LabelValue::Text(s.clone()),
            Cell::Empty => {
                return Err(RocError::input(format!("missing label in data row {row_no}")));
            }
        };
        let score = match cells.get(1).unwrap_or(&Cell::Empty) {
            Cell::Number(n) if n.is_nan() => {
                return Err(RocError::input(format!("score in data row {row_no} is NaN")));
            }
            Cell::Number(n) => *n,
            Cell::Text(s) => {
                return Err(RocError::input(format!(
                    "score '{s}' in data row {row_no} is not a number"
                )));
            }
            Cell::Empty => {
                return Err(RocError::input(format!("missing score in data row {row_no}")));
            }
        };

        let this_kind = match label {
            LabelValue::Number(_) => "numeric",
            LabelValue::Text(_) => "text",
        };
        match kind {
            None => kind = Some((this_kind, row_no)),
            Some((first, first_row)) if first != this_kind => {
                return Err(RocError::input(format!(
                    "label column mixes {first} (row {first_row}) and {this_kind} (row {row_no}) values"
                )));
            }
            Some(_) => {}
        }

        rows.push(LabeledScore { label, score });
    }

    if rows.is_empty() {
        return Err(RocError::input("no data rows below the header"));
    }

    let mut header = table.header.into_iter();
    Ok(Dataset {
        label_column: header.next().unwrap_or_default(),
        score_column: header.next().unwrap_or_default(),
        rows,
    })
}
