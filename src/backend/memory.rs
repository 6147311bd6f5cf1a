use super::{
    BackendError, BackendResult, CellValue, ChartKind, DocHandle, DocKind, DocumentBackend,
    QueryOutcome, ShapeKind,
};
use crate::address::{CellAddress, CellRange};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// In-process implementation of [`DocumentBackend`].
///
/// Documents live entirely in memory; `save` and `export_pdf` serialize the
/// document state as JSON so saved files round-trip through `open`. Opening a
/// file that is not in that format yields an empty document of the kind
/// inferred from its extension. There is no formula engine and no SQL engine;
/// the live office bridge owns both.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    docs: HashMap<u64, StoredDocument>,
    next_handle: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    kind: DocKind,
    properties: BTreeMap<String, String>,
    body: DocBody,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DocBody {
    Spreadsheet(SheetSet),
    Text(TextBody),
    Slides(SlideDeck),
    Database(TableSet),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetSet {
    sheets: Vec<Sheet>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Sheet {
    name: String,
    cells: BTreeMap<String, Cell>,
    charts: Vec<Chart>,
    conditional_formats: Vec<ConditionalFormat>,
    groups: Vec<RangeGroup>,
    formats: Vec<RangeFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Cell {
    value: CellValue,
    formula: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Chart {
    kind: ChartKind,
    data_range: String,
    target_cell: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConditionalFormat {
    range: String,
    condition: String,
    style: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RangeGroup {
    range: String,
    by_rows: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct RangeFormat {
    range: String,
    border_width: u32,
    background_color: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TextBody {
    content: String,
    tables: Vec<TextTable>,
    images: Vec<TextImage>,
    styles: Vec<TextSpanStyle>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextTable {
    position: u64,
    rows: u32,
    cols: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextImage {
    position: u64,
    url: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextSpanStyle {
    start: u64,
    end: u64,
    style: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SlideDeck {
    pages: Vec<Page>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Page {
    shapes: Vec<Shape>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Shape {
    kind: ShapeKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TableSet {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Table {
    columns: Vec<Column>,
    rows: Vec<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Column {
    name: String,
    data_type: String,
}

impl Sheet {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
            charts: Vec::new(),
            conditional_formats: Vec::new(),
            groups: Vec::new(),
            formats: Vec::new(),
        }
    }
}

impl StoredDocument {
    fn empty(kind: DocKind) -> Self {
        let body = match kind {
            DocKind::Spreadsheet => DocBody::Spreadsheet(SheetSet {
                sheets: vec![Sheet::named("Sheet1")],
            }),
            DocKind::Text => DocBody::Text(TextBody::default()),
            DocKind::Presentation | DocKind::Drawing => DocBody::Slides(SlideDeck {
                pages: vec![Page::default()],
            }),
            DocKind::Database => DocBody::Database(TableSet::default()),
        };
        Self {
            kind,
            properties: BTreeMap::new(),
            body,
        }
    }
}

impl SheetSet {
    fn get(&self, name: &str) -> BackendResult<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| BackendError::SheetNotFound(name.to_string()))
    }

    fn get_mut(&mut self, name: &str) -> BackendResult<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| BackendError::SheetNotFound(name.to_string()))
    }
}

fn cell_key(addr: CellAddress) -> String {
    addr.to_string()
}

fn strip_file_scheme(url: &str) -> &str {
    url.strip_prefix("file://").unwrap_or(url)
}

/// Byte index of the given char position, validating it against the content
/// length the way the office cursor API rejects out-of-range positions.
fn char_index(content: &str, position: u64) -> BackendResult<usize> {
    let total = content.chars().count() as u64;
    if position > total {
        return Err(BackendError::PositionOutOfRange {
            position,
            limit: total,
        });
    }
    Ok(content
        .char_indices()
        .nth(position as usize)
        .map(|(index, _)| index)
        .unwrap_or(content.len()))
}

fn value_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Number(_) => 0,
        CellValue::Text(_) => 1,
        CellValue::Bool(_) => 2,
        CellValue::Empty => 3,
    }
}

fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => value_rank(a).cmp(&value_rank(b)),
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, doc: StoredDocument) -> DocHandle {
        let handle = DocHandle(self.next_handle);
        self.next_handle += 1;
        self.docs.insert(handle.0, doc);
        handle
    }

    fn doc(&self, handle: DocHandle) -> BackendResult<&StoredDocument> {
        self.docs
            .get(&handle.0)
            .ok_or(BackendError::UnknownHandle(handle))
    }

    fn doc_mut(&mut self, handle: DocHandle) -> BackendResult<&mut StoredDocument> {
        self.docs
            .get_mut(&handle.0)
            .ok_or(BackendError::UnknownHandle(handle))
    }

    fn sheet_set(&self, handle: DocHandle) -> BackendResult<&SheetSet> {
        match &self.doc(handle)?.body {
            DocBody::Spreadsheet(set) => Ok(set),
            _ => Err(BackendError::OperationFailed(
                "document is not a spreadsheet".to_string(),
            )),
        }
    }

    fn sheet_set_mut(&mut self, handle: DocHandle) -> BackendResult<&mut SheetSet> {
        match &mut self.doc_mut(handle)?.body {
            DocBody::Spreadsheet(set) => Ok(set),
            _ => Err(BackendError::OperationFailed(
                "document is not a spreadsheet".to_string(),
            )),
        }
    }

    fn text_body(&self, handle: DocHandle) -> BackendResult<&TextBody> {
        match &self.doc(handle)?.body {
            DocBody::Text(body) => Ok(body),
            _ => Err(BackendError::OperationFailed(
                "document is not a text document".to_string(),
            )),
        }
    }

    fn text_body_mut(&mut self, handle: DocHandle) -> BackendResult<&mut TextBody> {
        match &mut self.doc_mut(handle)?.body {
            DocBody::Text(body) => Ok(body),
            _ => Err(BackendError::OperationFailed(
                "document is not a text document".to_string(),
            )),
        }
    }

    fn deck_mut(&mut self, handle: DocHandle) -> BackendResult<&mut SlideDeck> {
        match &mut self.doc_mut(handle)?.body {
            DocBody::Slides(deck) => Ok(deck),
            _ => Err(BackendError::OperationFailed(
                "document has no drawing pages".to_string(),
            )),
        }
    }

    fn table_set(&self, handle: DocHandle) -> BackendResult<&TableSet> {
        match &self.doc(handle)?.body {
            DocBody::Database(set) => Ok(set),
            _ => Err(BackendError::OperationFailed(
                "document is not a database".to_string(),
            )),
        }
    }

    fn table_set_mut(&mut self, handle: DocHandle) -> BackendResult<&mut TableSet> {
        match &mut self.doc_mut(handle)?.body {
            DocBody::Database(set) => Ok(set),
            _ => Err(BackendError::OperationFailed(
                "document is not a database".to_string(),
            )),
        }
    }

    fn write_state(&self, handle: DocHandle, url: &str) -> BackendResult<()> {
        let doc = self.doc(handle)?;
        let serialized = serde_json::to_string_pretty(doc).map_err(|err| {
            BackendError::OperationFailed(format!("failed to serialize document: {err}"))
        })?;
        fs::write(strip_file_scheme(url), serialized)?;
        Ok(())
    }
}

impl DocumentBackend for MemoryBackend {
    fn open(&mut self, url: &str) -> BackendResult<(DocHandle, DocKind)> {
        let path = Path::new(strip_file_scheme(url));
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(BackendError::OperationFailed(format!(
                "'{}' is not a regular file",
                path.display()
            )));
        }

        let bytes = fs::read(path)?;
        let doc = match serde_json::from_slice::<StoredDocument>(&bytes) {
            Ok(doc) => doc,
            Err(_) => {
                let kind = DocKind::from_url(url).ok_or_else(|| {
                    BackendError::UnsupportedFormat(format!(
                        "cannot infer document type from '{url}'"
                    ))
                })?;
                StoredDocument::empty(kind)
            }
        };

        let kind = doc.kind;
        Ok((self.alloc(doc), kind))
    }

    fn create(&mut self, kind: DocKind) -> BackendResult<DocHandle> {
        Ok(self.alloc(StoredDocument::empty(kind)))
    }

    fn close(&mut self, handle: DocHandle) -> BackendResult<()> {
        self.docs
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(BackendError::UnknownHandle(handle))
    }

    fn save(
        &mut self,
        handle: DocHandle,
        url: &str,
        filter_name: Option<&str>,
    ) -> BackendResult<()> {
        if let Some(filter) = filter_name
            && filter.trim().is_empty()
        {
            return Err(BackendError::OperationFailed(
                "filter name must not be empty".to_string(),
            ));
        }
        self.write_state(handle, url)
    }

    fn export_pdf(&mut self, handle: DocHandle, url: &str) -> BackendResult<()> {
        self.write_state(handle, url)
    }

    fn document_properties(&self, handle: DocHandle) -> BackendResult<BTreeMap<String, String>> {
        Ok(self.doc(handle)?.properties.clone())
    }

    fn set_document_properties(
        &mut self,
        handle: DocHandle,
        properties: &BTreeMap<String, String>,
    ) -> BackendResult<()> {
        self.doc_mut(handle)?
            .properties
            .extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn run_macro(
        &mut self,
        handle: DocHandle,
        macro_name: &str,
        args: &[serde_json::Value],
    ) -> BackendResult<String> {
        self.doc(handle)?;
        Ok(format!(
            "macro '{macro_name}' completed with {} argument(s)",
            args.len()
        ))
    }

    fn sheet_names(&self, handle: DocHandle) -> BackendResult<Vec<String>> {
        Ok(self
            .sheet_set(handle)?
            .sheets
            .iter()
            .map(|sheet| sheet.name.clone())
            .collect())
    }

    fn add_sheet(&mut self, handle: DocHandle, name: &str) -> BackendResult<()> {
        let set = self.sheet_set_mut(handle)?;
        if set.sheets.iter().any(|sheet| sheet.name == name) {
            return Err(BackendError::SheetExists(name.to_string()));
        }
        set.sheets.push(Sheet::named(name));
        Ok(())
    }

    fn cell_value(
        &self,
        handle: DocHandle,
        sheet: &str,
        cell: CellAddress,
    ) -> BackendResult<CellValue> {
        let sheet = self.sheet_set(handle)?.get(sheet)?;
        Ok(sheet
            .cells
            .get(&cell_key(cell))
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty))
    }

    fn set_cell_value(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        cell: CellAddress,
        value: CellValue,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        // Writing a value replaces any formula, as in the live suite.
        sheet.cells.insert(
            cell_key(cell),
            Cell {
                value,
                formula: None,
            },
        );
        Ok(())
    }

    fn set_cell_formula(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        cell: CellAddress,
        formula: &str,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        // No formula engine here: the formula text is kept, the value stays
        // empty until the live suite evaluates it.
        sheet.cells.insert(
            cell_key(cell),
            Cell {
                value: CellValue::Empty,
                formula: Some(formula.to_string()),
            },
        );
        Ok(())
    }

    fn range_values(
        &self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
    ) -> BackendResult<Vec<CellValue>> {
        let sheet = self.sheet_set(handle)?.get(sheet)?;
        let mut values = Vec::new();
        for row in range.start.row..=range.end.row {
            for col in range.start.col..=range.end.col {
                values.push(
                    sheet
                        .cells
                        .get(&cell_key(CellAddress::new(row, col)))
                        .map(|c| c.value.clone())
                        .unwrap_or(CellValue::Empty),
                );
            }
        }
        Ok(values)
    }

    fn sort_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        sort_column: u32,
        ascending: bool,
    ) -> BackendResult<()> {
        if sort_column >= range.col_count() {
            return Err(BackendError::OperationFailed(format!(
                "sort column {sort_column} outside range {range}"
            )));
        }
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;

        let mut rows: Vec<Vec<Option<Cell>>> = Vec::new();
        for row in range.start.row..=range.end.row {
            let mut cells = Vec::new();
            for col in range.start.col..=range.end.col {
                cells.push(sheet.cells.remove(&cell_key(CellAddress::new(row, col))));
            }
            rows.push(cells);
        }

        let key_index = sort_column as usize;
        rows.sort_by(|a, b| {
            let left = a[key_index]
                .as_ref()
                .map(|c| &c.value)
                .unwrap_or(&CellValue::Empty);
            let right = b[key_index]
                .as_ref()
                .map(|c| &c.value)
                .unwrap_or(&CellValue::Empty);
            compare_values(left, right)
        });
        if !ascending {
            rows.reverse();
        }

        for (row_offset, cells) in rows.into_iter().enumerate() {
            let row = range.start.row + row_offset as u32;
            for (col_offset, cell) in cells.into_iter().enumerate() {
                if let Some(cell) = cell {
                    let col = range.start.col + col_offset as u32;
                    sheet.cells.insert(cell_key(CellAddress::new(row, col)), cell);
                }
            }
        }
        Ok(())
    }

    fn format_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        border_width: u32,
        background_color: &str,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        sheet.formats.push(RangeFormat {
            range: range.to_string(),
            border_width,
            background_color: background_color.to_string(),
        });
        Ok(())
    }

    fn create_chart(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        data_range: CellRange,
        chart_kind: ChartKind,
        target_cell: CellAddress,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        sheet.charts.push(Chart {
            kind: chart_kind,
            data_range: data_range.to_string(),
            target_cell: target_cell.to_string(),
        });
        Ok(())
    }

    fn conditional_format(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        condition: &str,
        style: &str,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        sheet.conditional_formats.push(ConditionalFormat {
            range: range.to_string(),
            condition: condition.to_string(),
            style: style.to_string(),
        });
        Ok(())
    }

    fn group_range(
        &mut self,
        handle: DocHandle,
        sheet: &str,
        range: CellRange,
        by_rows: bool,
    ) -> BackendResult<()> {
        let sheet = self.sheet_set_mut(handle)?.get_mut(sheet)?;
        sheet.groups.push(RangeGroup {
            range: range.to_string(),
            by_rows,
        });
        Ok(())
    }

    fn text_content(&self, handle: DocHandle) -> BackendResult<String> {
        Ok(self.text_body(handle)?.content.clone())
    }

    fn insert_text(&mut self, handle: DocHandle, position: u64, text: &str) -> BackendResult<()> {
        let body = self.text_body_mut(handle)?;
        let index = char_index(&body.content, position)?;
        body.content.insert_str(index, text);
        Ok(())
    }

    fn insert_table(
        &mut self,
        handle: DocHandle,
        position: u64,
        rows: u32,
        cols: u32,
    ) -> BackendResult<()> {
        let body = self.text_body_mut(handle)?;
        char_index(&body.content, position)?;
        body.tables.push(TextTable {
            position,
            rows,
            cols,
        });
        Ok(())
    }

    fn apply_text_style(
        &mut self,
        handle: DocHandle,
        start: u64,
        end: u64,
        style_name: &str,
    ) -> BackendResult<()> {
        let body = self.text_body_mut(handle)?;
        char_index(&body.content, start)?;
        char_index(&body.content, end)?;
        body.styles.push(TextSpanStyle {
            start,
            end,
            style: style_name.to_string(),
        });
        Ok(())
    }

    fn insert_image(
        &mut self,
        handle: DocHandle,
        position: u64,
        image_url: &str,
    ) -> BackendResult<()> {
        let body = self.text_body_mut(handle)?;
        char_index(&body.content, position)?;
        body.images.push(TextImage {
            position,
            url: image_url.to_string(),
        });
        Ok(())
    }

    fn insert_slide(&mut self, handle: DocHandle, position: u64) -> BackendResult<()> {
        let deck = self.deck_mut(handle)?;
        let limit = deck.pages.len() as u64;
        if position > limit {
            return Err(BackendError::PositionOutOfRange { position, limit });
        }
        deck.pages.insert(position as usize, Page::default());
        Ok(())
    }

    fn add_shape(
        &mut self,
        handle: DocHandle,
        page: u64,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> BackendResult<()> {
        let deck = self.deck_mut(handle)?;
        if page == 0 || page > deck.pages.len() as u64 {
            return Err(BackendError::PageNotFound(page));
        }
        deck.pages[(page - 1) as usize].shapes.push(Shape {
            kind: shape,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn list_tables(&self, handle: DocHandle) -> BackendResult<Vec<String>> {
        Ok(self.table_set(handle)?.tables.keys().cloned().collect())
    }

    fn create_table(
        &mut self,
        handle: DocHandle,
        table_name: &str,
        columns: &[(String, String)],
    ) -> BackendResult<()> {
        let set = self.table_set_mut(handle)?;
        if set.tables.contains_key(table_name) {
            return Err(BackendError::TableExists(table_name.to_string()));
        }
        set.tables.insert(
            table_name.to_string(),
            Table {
                columns: columns
                    .iter()
                    .map(|(name, data_type)| Column {
                        name: name.clone(),
                        data_type: data_type.clone(),
                    })
                    .collect(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn delete_table(&mut self, handle: DocHandle, table_name: &str) -> BackendResult<()> {
        self.table_set_mut(handle)?
            .tables
            .remove(table_name)
            .map(|_| ())
            .ok_or_else(|| BackendError::TableNotFound(table_name.to_string()))
    }

    fn insert_row(
        &mut self,
        handle: DocHandle,
        table_name: &str,
        row: &BTreeMap<String, serde_json::Value>,
    ) -> BackendResult<()> {
        let set = self.table_set_mut(handle)?;
        let table = set
            .tables
            .get_mut(table_name)
            .ok_or_else(|| BackendError::TableNotFound(table_name.to_string()))?;
        if !table.columns.is_empty() {
            for key in row.keys() {
                if !table.columns.iter().any(|column| &column.name == key) {
                    return Err(BackendError::OperationFailed(format!(
                        "unknown column '{key}' in table '{table_name}'"
                    )));
                }
            }
        }
        table.rows.push(row.clone());
        Ok(())
    }

    fn run_query(&mut self, handle: DocHandle, sql: &str) -> BackendResult<QueryOutcome> {
        let trimmed = sql.trim().trim_end_matches(';').trim();
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if tokens.len() == 4
            && tokens[0].eq_ignore_ascii_case("select")
            && tokens[1] == "*"
            && tokens[2].eq_ignore_ascii_case("from")
        {
            let table = self
                .table_set(handle)?
                .tables
                .get(tokens[3])
                .ok_or_else(|| BackendError::TableNotFound(tokens[3].to_string()))?;
            return Ok(QueryOutcome::Rows(table.rows.clone()));
        }

        if tokens.len() == 3
            && tokens[0].eq_ignore_ascii_case("delete")
            && tokens[1].eq_ignore_ascii_case("from")
        {
            let set = self.table_set_mut(handle)?;
            let table = set
                .tables
                .get_mut(tokens[2])
                .ok_or_else(|| BackendError::TableNotFound(tokens[2].to_string()))?;
            let affected = table.rows.len() as u64;
            table.rows.clear();
            return Ok(QueryOutcome::Updated(affected));
        }

        Err(BackendError::UnsupportedQuery(
            "only 'SELECT * FROM <table>' and 'DELETE FROM <table>' run without a live office backend"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn open_infers_kind_from_extension() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("book.ods");
        File::create(&path).expect("file");

        let mut backend = MemoryBackend::new();
        let (_, kind) = backend.open(path.to_str().unwrap()).expect("open");
        assert_eq!(kind, DocKind::Spreadsheet);
    }

    #[test]
    fn open_rejects_missing_file_and_unknown_extension() {
        let mut backend = MemoryBackend::new();
        assert!(matches!(
            backend.open("/definitely/missing/book.ods"),
            Err(BackendError::Io(_))
        ));

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("book.unknown");
        File::create(&path).expect("file");
        assert!(matches!(
            backend.open(path.to_str().unwrap()),
            Err(BackendError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn cell_round_trip_and_empty_default() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Spreadsheet).expect("create");
        let b2 = CellAddress::parse("B2").unwrap();

        assert_eq!(
            backend.cell_value(handle, "Sheet1", b2).expect("get"),
            CellValue::Empty
        );
        backend
            .set_cell_value(handle, "Sheet1", b2, CellValue::Number(42.0))
            .expect("set");
        assert_eq!(
            backend.cell_value(handle, "Sheet1", b2).expect("get"),
            CellValue::Number(42.0)
        );
    }

    #[test]
    fn unknown_sheet_and_duplicate_sheet_fail() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Spreadsheet).expect("create");
        let a1 = CellAddress::parse("A1").unwrap();

        assert!(matches!(
            backend.cell_value(handle, "Nope", a1),
            Err(BackendError::SheetNotFound(_))
        ));
        backend.add_sheet(handle, "Data").expect("add");
        assert!(matches!(
            backend.add_sheet(handle, "Data"),
            Err(BackendError::SheetExists(_))
        ));
        assert_eq!(backend.sheet_names(handle).expect("names"), ["Sheet1", "Data"]);
    }

    #[test]
    fn insert_text_respects_char_positions() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Text).expect("create");

        backend.insert_text(handle, 0, "héllo").expect("insert");
        backend.insert_text(handle, 5, "!").expect("append");
        backend.insert_text(handle, 1, "_").expect("middle");
        assert_eq!(backend.text_content(handle).expect("content"), "h_éllo!");

        assert!(matches!(
            backend.insert_text(handle, 100, "x"),
            Err(BackendError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn save_then_open_round_trips_document_state() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("saved.ods");

        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Spreadsheet).expect("create");
        let a1 = CellAddress::parse("A1").unwrap();
        backend
            .set_cell_value(handle, "Sheet1", a1, CellValue::Text("kept".to_string()))
            .expect("set");
        backend.save(handle, path.to_str().unwrap(), None).expect("save");

        let (reopened, kind) = backend.open(path.to_str().unwrap()).expect("open");
        assert_eq!(kind, DocKind::Spreadsheet);
        assert_eq!(
            backend.cell_value(reopened, "Sheet1", a1).expect("get"),
            CellValue::Text("kept".to_string())
        );
    }

    #[test]
    fn query_select_and_delete() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Database).expect("create");
        backend
            .create_table(
                handle,
                "people",
                &[("name".to_string(), "VARCHAR".to_string())],
            )
            .expect("create table");
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), json!("ada"));
        backend.insert_row(handle, "people", &row).expect("insert");

        match backend.run_query(handle, "SELECT * FROM people;").expect("select") {
            QueryOutcome::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("name"), Some(&json!("ada")));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match backend.run_query(handle, "delete from people").expect("delete") {
            QueryOutcome::Updated(affected) => assert_eq!(affected, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert!(matches!(
            backend.run_query(handle, "SELECT name FROM people"),
            Err(BackendError::UnsupportedQuery(_))
        ));
    }

    #[test]
    fn insert_row_rejects_undeclared_columns() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Database).expect("create");
        backend
            .create_table(
                handle,
                "people",
                &[("name".to_string(), "VARCHAR".to_string())],
            )
            .expect("create table");

        let mut row = BTreeMap::new();
        row.insert("age".to_string(), json!(5));
        assert!(matches!(
            backend.insert_row(handle, "people", &row),
            Err(BackendError::OperationFailed(_))
        ));
    }

    #[test]
    fn sort_range_orders_rows_by_key_column() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Spreadsheet).expect("create");
        for (cell, value) in [("A1", 3.0), ("A2", 1.0), ("A3", 2.0)] {
            backend
                .set_cell_value(
                    handle,
                    "Sheet1",
                    CellAddress::parse(cell).unwrap(),
                    CellValue::Number(value),
                )
                .expect("set");
        }
        let range = CellRange::parse("A1:A3").unwrap();
        backend.sort_range(handle, "Sheet1", range, 0, true).expect("sort");

        let values = backend.range_values(handle, "Sheet1", range).expect("values");
        assert_eq!(
            values,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(2.0),
                CellValue::Number(3.0)
            ]
        );
    }

    #[test]
    fn slides_and_shapes() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create(DocKind::Presentation).expect("create");

        backend.insert_slide(handle, 1).expect("append slide");
        backend
            .add_shape(handle, 2, ShapeKind::Ellipse, 10.0, 10.0, 40.0, 20.0)
            .expect("shape");
        assert!(matches!(
            backend.add_shape(handle, 9, ShapeKind::Line, 0.0, 0.0, 1.0, 1.0),
            Err(BackendError::PageNotFound(9))
        ));
        assert!(matches!(
            backend.insert_slide(handle, 10),
            Err(BackendError::PositionOutOfRange { .. })
        ));
    }
}
