use crate::address::{CellAddress, CellRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryBackend;

/// Opaque reference to an open document inside the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocHandle(pub u64);

impl fmt::Display for DocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Application kind of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Spreadsheet,
    Text,
    Presentation,
    Drawing,
    Database,
}

impl DocKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Spreadsheet => "spreadsheet",
            DocKind::Text => "text",
            DocKind::Presentation => "presentation",
            DocKind::Drawing => "drawing",
            DocKind::Database => "database",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "spreadsheet" => Some(DocKind::Spreadsheet),
            "text" => Some(DocKind::Text),
            "presentation" => Some(DocKind::Presentation),
            "drawing" => Some(DocKind::Drawing),
            "database" => Some(DocKind::Database),
            _ => None,
        }
    }

    /// Infer the kind from a document path or file:// URL by extension.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "ods" | "ots" | "xlsx" | "xls" | "csv" => Some(DocKind::Spreadsheet),
            "odt" | "ott" | "docx" | "doc" | "rtf" | "txt" => Some(DocKind::Text),
            "odp" | "otp" | "pptx" | "ppt" => Some(DocKind::Presentation),
            "odg" | "otg" => Some(DocKind::Drawing),
            "odb" => Some(DocKind::Database),
            _ => None,
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value held by a spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Convert a JSON scalar into a cell value. Numeric strings coerce to
    /// numbers, matching how the office suite treats typed-in text.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(CellValue::Empty),
            serde_json::Value::Bool(b) => Some(CellValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number),
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(n) if !trimmed.is_empty() && n.is_finite() => Some(CellValue::Number(n)),
                    _ => Some(CellValue::Text(s.clone())),
                }
            }
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Empty => serde_json::Value::Null,
            CellValue::Number(n) => serde_json::json!(n),
            CellValue::Text(s) => serde_json::json!(s),
            CellValue::Bool(b) => serde_json::json!(b),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Chart diagram kinds the suite can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Column,
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Column => "column",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "column" => Some(ChartKind::Column),
            "bar" => Some(ChartKind::Bar),
            "line" => Some(ChartKind::Line),
            "pie" => Some(ChartKind::Pie),
            _ => None,
        }
    }
}

/// Shape kinds for draw/impress pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    TextBox,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::TextBox => "text_box",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rectangle" => Some(ShapeKind::Rectangle),
            "ellipse" => Some(ShapeKind::Ellipse),
            "line" => Some(ShapeKind::Line),
            "text_box" => Some(ShapeKind::TextBox),
            _ => None,
        }
    }
}

/// Result of running SQL against a database document.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(Vec<BTreeMap<String, serde_json::Value>>),
    Updated(u64),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no open document for handle {0}")]
    UnknownHandle(DocHandle),
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("sheet '{0}' already exists")]
    SheetExists(String),
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("table '{0}' already exists")]
    TableExists(String),
    #[error("position {position} out of range (0-{limit})")]
    PositionOutOfRange { position: u64, limit: u64 },
    #[error("page {0} does not exist")]
    PageNotFound(u64),
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    OperationFailed(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// One method per logical document capability. The server is written against
/// this trait; this repository ships [`MemoryBackend`], and the live office
/// bridge implements the same surface out of tree.
///
/// Calls are synchronous and carry no timeout; a call that blocks in the
/// external office process blocks the caller.
pub trait DocumentBackend {
    // Document lifecycle and metadata.
    fn open(&mut self, url: &str) -> BackendResult<(DocHandle, DocKind)>;
    fn create(&mut self, kind: DocKind) -> BackendResult<DocHandle>;
    fn close(&mut self, handle: DocHandle) -> BackendResult<()>;
    fn save(&mut self, handle: DocHandle, url: &str, filter_name: Option<&str>)
    -> BackendResult<()>;
    fn export_pdf(&mut self, handle: DocHandle, url: &str) -> BackendResult<()>;
    fn document_properties(&self, handle: DocHandle) -> BackendResult<BTreeMap<String, String>>;
    fn set_document_properties(
        &mut self,
        handle: DocHandle,
        properties: &BTreeMap<String, String>,
    ) -> BackendResult<()>;
    fn run_macro(
        &mut self,
        handle: DocHandle,
        macro_name: &str,
        args: &[serde_json::Value],
    ) -> BackendResult<String>;

    // Spreadsheet capabilities.
    fn sheet_names(&self, handle: DocHandle) -> BackendResult<Vec<String>>;
    fn add_sheet(&mut self, handle: DocHandle, name: &str) -> BackendResult<()>;
    fn cell_value(&self, handle: DocHandle, sheet: &str, cell: CellAddress)
    -> BackendResult<CellValue>;
    fn set_cell_value(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        cell: CellAddress,
        value: CellValue,
    ) -> BackendResult<()>;
    fn set_cell_formula(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        cell: CellAddress,
        formula: &str,
    ) -> BackendResult<()>;
    fn range_values(
        &self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
    ) -> BackendResult<Vec<CellValue>>;
    fn sort_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        sort_column: u32,
        ascending: bool,
    ) -> BackendResult<()>;
    fn format_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        border_width: u32,
        background_color: &str,
    ) -> BackendResult<()>;
    fn create_chart(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        data_range: CellRange,
        chart_kind: ChartKind,
        target_cell: CellAddress,
    ) -> BackendResult<()>;
    fn conditional_format(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        condition: &str,
        style: &str,
    ) -> BackendResult<()>;
    fn group_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        by_rows: bool,
    ) -> BackendResult<()>;

    // Text-document capabilities.
    fn text_content(&self, handle: DocHandle) -> BackendResult<String>;
    fn insert_text(&mut self, handle: DocHandle, position: u64, text: &str) -> BackendResult<()>;
    fn insert_table(
        &mut self,
        handle: DocHandle,
        position: u64,
        rows: u32,
        cols: u32,
    ) -> BackendResult<()>;
    fn apply_text_style(
        &mut self,
        handle: DocHandle,
        start: u64,
        end: u64,
        style_name: &str,
    ) -> BackendResult<()>;
    fn insert_image(
        &mut self,
        handle: DocHandle,
        position: u64,
        image_url: &str,
    ) -> BackendResult<()>;

    // Presentation/drawing capabilities.
    fn insert_slide(&mut self, handle: DocHandle, position: u64) -> BackendResult<()>;
    #[allow(clippy::too_many_arguments)]
    fn add_shape(
        &mut self,
        handle: DocHandle,
        page: u64,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> BackendResult<()>;

    // Database capabilities.
    fn list_tables(&self, handle: DocHandle) -> BackendResult<Vec<String>>;
    fn create_table(
        &mut self,
        handle: DocHandle,
        table_name: &str,
        columns: &[(String, String)],
    ) -> BackendResult<()>;
    fn delete_table(&mut self, handle: DocHandle, table_name: &str) -> BackendResult<()>;
    fn insert_row(
        &mut self,
        handle: DocHandle,
        table_name: &str,
        row: &BTreeMap<String, serde_json::Value>,
    ) -> BackendResult<()>;
    fn run_query(&mut self, handle: DocHandle, sql: &str) -> BackendResult<QueryOutcome>;
}
