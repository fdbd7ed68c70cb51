//! Competitive product comparison pipeline.
//!
//! ```text
//! CSV bytes -> Dataset (normalised headers)
//!           -> numeric / text column split
//!           -> Selection (<= 5 brand+model groups, chosen columns)
//!           -> ChartSpec per numeric column + transposed ComparisonTable
//!           -> summary prompt for the text-generation endpoint
//! ```
//!
//! Everything here is pure; fetching overlay images and calling the
//! text-generation endpoint happen in the API layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Canonical columns
// ---------------------------------------------------------------------------

pub const COL_BRAND: &str = "brand";
pub const COL_MODEL: &str = "model";
pub const COL_IMAGE_URL: &str = "image_url";
pub const COL_LOGO_URL: &str = "logo_url";

/// Columns that identify or decorate a product and are never offered as
/// comparison columns.
pub const IDENTITY_COLUMNS: &[&str] = &[COL_BRAND, COL_MODEL, COL_IMAGE_URL, COL_LOGO_URL];

/// Maximum number of brand+model groups compared at once.
pub const MAX_SELECTED_GROUPS: usize = 5;

/// Known header variants and their canonical names. Matched case-insensitively
/// after trimming.
const LABEL_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("brand", COL_BRAND),
    ("brand name", COL_BRAND),
    ("品牌", COL_BRAND),
    ("廠牌", COL_BRAND),
    ("model", COL_MODEL),
    ("model name", COL_MODEL),
    ("型號", COL_MODEL),
    ("image", COL_IMAGE_URL),
    ("image url", COL_IMAGE_URL),
    ("image_url", COL_IMAGE_URL),
    ("product image", COL_IMAGE_URL),
    ("圖片", COL_IMAGE_URL),
    ("logo", COL_LOGO_URL),
    ("logo url", COL_LOGO_URL),
    ("logo_url", COL_LOGO_URL),
    ("品牌logo", COL_LOGO_URL),
];

/// Map a raw header to its canonical name, or return it trimmed.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    let lowered = trimmed.to_lowercase();
    LABEL_SUBSTITUTIONS
        .iter()
        .find(|(variant, _)| *variant == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Parse a numeric cell. Thousands separators are ignored; empty is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// An uploaded comparison table with normalised headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A distinct brand+model pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub brand: String,
    pub model: String,
}

impl GroupKey {
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}

/// Column split and groups reported back after upload.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub numeric_columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub groups: Vec<GroupOption>,
    pub has_product_images: bool,
    pub has_logos: bool,
}

/// A group as offered for selection.
#[derive(Debug, Clone, Serialize)]
pub struct GroupOption {
    #[serde(flatten)]
    pub key: GroupKey,
    pub label: String,
}

impl Dataset {
    /// Parse uploaded CSV bytes. `brand` and `model` columns are required
    /// after header normalisation.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| CoreError::Validation(format!("Unreadable CSV header: {e}")))?
            .iter()
            .map(normalize_label)
            .collect();

        for required in [COL_BRAND, COL_MODEL] {
            if !columns.iter().any(|c| c == required) {
                return Err(CoreError::Validation(format!(
                    "Uploaded table must contain a '{required}' column"
                )));
            }
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                CoreError::Validation(format!("Unreadable CSV row {}: {e}", line + 2))
            })?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Index of the first column with this canonical name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text, empty when the column is absent.
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.column_index(column)
            .and_then(|i| self.rows.get(row).and_then(|r| r.get(i)))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn is_numeric(&self, index: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            let cell = row.get(index).map(String::as_str).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            if parse_number(cell).is_none() {
                return false;
            }
            seen = true;
        }
        seen
    }

    fn comparable_columns(&self) -> impl Iterator<Item = (usize, &String)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, c)| {
                !IDENTITY_COLUMNS.contains(&c.as_str()) && self.column_index(c) == Some(*i)
            })
    }

    /// Columns whose non-empty cells are all numbers.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.comparable_columns()
            .filter(|(i, _)| self.is_numeric(*i))
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Every other comparable column.
    pub fn text_columns(&self) -> Vec<String> {
        self.comparable_columns()
            .filter(|(i, _)| !self.is_numeric(*i))
            .map(|(_, c)| c.clone())
            .collect()
    }

    fn group_of(&self, row: usize) -> GroupKey {
        GroupKey {
            brand: self.cell(row, COL_BRAND).to_string(),
            model: self.cell(row, COL_MODEL).to_string(),
        }
    }

    /// Distinct brand+model pairs in file order.
    pub fn groups(&self) -> Vec<GroupKey> {
        let mut groups: Vec<GroupKey> = Vec::new();
        for row in 0..self.rows.len() {
            let key = self.group_of(row);
            if !groups.contains(&key) {
                groups.push(key);
            }
        }
        groups
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            row_count: self.rows.len(),
            numeric_columns: self.numeric_columns(),
            text_columns: self.text_columns(),
            groups: self
                .groups()
                .into_iter()
                .map(|key| GroupOption {
                    label: key.label(),
                    key,
                })
                .collect(),
            has_product_images: self.column_index(COL_IMAGE_URL).is_some(),
            has_logos: self.column_index(COL_LOGO_URL).is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Chart style chosen per numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Scatter,
}

/// A numeric column and how to chart it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericChoice {
    pub column: String,
    #[serde(default)]
    pub kind: ChartKind,
}

/// Operator's choices for one comparison report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub groups: Vec<GroupKey>,
    #[serde(default)]
    pub numeric_columns: Vec<NumericChoice>,
    #[serde(default)]
    pub text_columns: Vec<String>,
    #[serde(default)]
    pub summarize: bool,
}

/// A validated selection resolved against a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSlice {
    pub groups: Vec<GroupKey>,
    /// Indexes of dataset rows belonging to the selected groups, in file order.
    pub rows: Vec<usize>,
    pub numeric: Vec<NumericChoice>,
    pub text: Vec<String>,
}

impl ComparisonSlice {
    /// Whether any chart or table would be produced.
    pub fn has_columns(&self) -> bool {
        !self.numeric.is_empty() || !self.text.is_empty()
    }
}

/// Validate a selection and resolve it to dataset rows.
pub fn select(dataset: &Dataset, selection: &Selection) -> Result<ComparisonSlice, CoreError> {
    if selection.groups.len() > MAX_SELECTED_GROUPS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_SELECTED_GROUPS} products can be compared, got {}",
            selection.groups.len()
        )));
    }

    let known_groups = dataset.groups();
    let mut groups: Vec<GroupKey> = Vec::new();
    for group in &selection.groups {
        if !known_groups.contains(group) {
            return Err(CoreError::Validation(format!(
                "Unknown product '{}'",
                group.label()
            )));
        }
        if !groups.contains(group) {
            groups.push(group.clone());
        }
    }

    let numeric_columns = dataset.numeric_columns();
    for choice in &selection.numeric_columns {
        if !numeric_columns.contains(&choice.column) {
            return Err(CoreError::Validation(format!(
                "'{}' is not a numeric column",
                choice.column
            )));
        }
    }

    let text_columns = dataset.text_columns();
    for column in &selection.text_columns {
        if !text_columns.contains(column) {
            return Err(CoreError::Validation(format!(
                "'{column}' is not a text column"
            )));
        }
    }

    let rows = (0..dataset.rows.len())
        .filter(|&row| groups.contains(&dataset.group_of(row)))
        .collect();

    Ok(ComparisonSlice {
        groups,
        rows,
        numeric: selection.numeric_columns.clone(),
        text: selection.text_columns.clone(),
    })
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// One plotted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub value: Option<f64>,
    /// Source URLs as found in the upload.
    pub logo_url: Option<String>,
    pub image_url: Option<String>,
    /// Prepared overlays as PNG data URLs; absent when fetching failed.
    pub logo: Option<String>,
    pub image: Option<String>,
}

/// Everything a client needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub column: String,
    pub kind: ChartKind,
    pub series: Vec<ChartSeries>,
}

fn non_empty(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// One chart per selected numeric column, one series entry per selected row.
pub fn chart_specs(dataset: &Dataset, slice: &ComparisonSlice) -> Vec<ChartSpec> {
    slice
        .numeric
        .iter()
        .map(|choice| ChartSpec {
            column: choice.column.clone(),
            kind: choice.kind,
            series: slice
                .rows
                .iter()
                .map(|&row| ChartSeries {
                    label: dataset.group_of(row).label(),
                    value: parse_number(dataset.cell(row, &choice.column)),
                    logo_url: non_empty(dataset.cell(row, COL_LOGO_URL)),
                    image_url: non_empty(dataset.cell(row, COL_IMAGE_URL)),
                    logo: None,
                    image: None,
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Transposed comparison: one row per chosen field, one column per product row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub products: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub field: String,
    pub values: Vec<String>,
}

/// Build the transposed table of text columns, `None` when none were chosen.
pub fn comparison_table(dataset: &Dataset, slice: &ComparisonSlice) -> Option<ComparisonTable> {
    if slice.text.is_empty() {
        return None;
    }
    Some(ComparisonTable {
        products: slice
            .rows
            .iter()
            .map(|&row| dataset.group_of(row).label())
            .collect(),
        rows: slice
            .text
            .iter()
            .map(|field| TableRow {
                field: field.clone(),
                values: slice
                    .rows
                    .iter()
                    .map(|&row| dataset.cell(row, field).to_string())
                    .collect(),
            })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Summary prompt
// ---------------------------------------------------------------------------

/// Render the selected rows and columns as CSV text.
pub fn slice_to_csv(dataset: &Dataset, slice: &ComparisonSlice) -> Result<String, CoreError> {
    let mut header: Vec<&str> = vec![COL_BRAND, COL_MODEL];
    header.extend(slice.numeric.iter().map(|c| c.column.as_str()));
    header.extend(slice.text.iter().map(String::as_str));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&header)
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    for &row in &slice.rows {
        let record: Vec<&str> = header.iter().map(|c| dataset.cell(row, c)).collect();
        writer
            .write_record(&record)
            .map_err(|e| CoreError::Internal(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(e.to_string()))
}

/// Prompt asking the text-generation endpoint to summarise the comparison.
pub fn build_summary_prompt(dataset: &Dataset, slice: &ComparisonSlice) -> Result<String, CoreError> {
    let table = slice_to_csv(dataset, slice)?;
    let products: Vec<String> = slice.groups.iter().map(GroupKey::label).collect();
    Ok(format!(
        "Compare the following products: {}.\n\
         Summarise their strengths and weaknesses based on this data:\n\n{table}",
        products.join(", ")
    ))
}
