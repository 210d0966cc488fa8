//! Generic listing table renderer.
//!
//! `render` is a pure function from a [`TableConfig`] to a [`RenderedTable`];
//! callers re-invoke it whenever rows change. The rendered structure is turned
//! into markup by [`RenderedTable::to_html`].

use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::domain::row::RowViewModel;

pub type TableResult<T> = Result<T, tera::Error>;

/// Class appended to every other body row when striping is enabled.
pub const STRIPE_CLASS: &str = "table-row-striped";

const TABLE_TEMPLATE: &str = r#"<table class="table">
<thead><tr>{% for header in table.thead %}<th{% if header.class %} class="{{ header.class }}"{% endif %}>{{ header.label }}</th>{% endfor %}</tr></thead>
<tbody>{% for row in table.tbody %}
<tr{% if row.class %} class="{{ row.class }}"{% endif %}>{% for cell in row.cells %}<td{% if cell.colspan %} colspan="{{ cell.colspan }}"{% endif %}{% if cell.class %} class="{{ cell.class }}"{% endif %}>{% if cell.content.kind == "html" %}{{ cell.content.value | safe }}{% elif cell.content.kind == "text" %}{{ cell.content.value }}{% endif %}</td>{% endfor %}</tr>{% endfor %}
</tbody>
</table>
"#;

/// Anything the renderer can read cells from by column key.
pub trait TableRow {
    fn cell_value(&self, key: &str) -> Option<Value>;
}

impl TableRow for RowViewModel {
    fn cell_value(&self, key: &str) -> Option<Value> {
        self.value(key)
    }
}

/// Passed to custom cell renderers.
#[derive(Debug)]
pub struct CellContext<'a> {
    pub key: &'a str,
    pub row_index: usize,
    pub value: Option<&'a Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellContent {
    /// Markup fragment. Sanitized before it reaches the output.
    Html(String),
    Text(String),
    Empty,
}

impl CellContent {
    /// Default stringification of a raw cell value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => CellContent::Empty,
            Some(Value::String(s)) if s.is_empty() => CellContent::Empty,
            Some(Value::String(s)) => CellContent::Text(s.clone()),
            Some(other) => CellContent::Text(other.to_string()),
        }
    }

    fn sanitized(self) -> Self {
        match self {
            CellContent::Html(fragment) => CellContent::Html(ammonia::clean(&fragment)),
            other => other,
        }
    }
}

pub type CellRenderer<R> = Box<dyn Fn(&R, &CellContext<'_>) -> CellContent + Send + Sync>;
pub type RowClassFn<R> = Box<dyn Fn(&R, usize) -> Option<String> + Send + Sync>;

pub struct HeaderDescriptor<R> {
    pub key: String,
    pub label: String,
    pub header_class: Option<String>,
    pub cell_class: Option<String>,
    /// When present, the only source of the cell's content.
    pub render: Option<CellRenderer<R>>,
}

impl<R> HeaderDescriptor<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            header_class: None,
            cell_class: None,
            render: None,
        }
    }

    pub fn header_class(mut self, class: impl Into<String>) -> Self {
        self.header_class = Some(class.into());
        self
    }

    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R, &CellContext<'_>) -> CellContent + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }
}

impl<R> std::fmt::Debug for HeaderDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("header_class", &self.header_class)
            .field("cell_class", &self.cell_class)
            .field("render", &self.render.is_some())
            .finish()
    }
}

pub enum EmptyState {
    Text(String),
    Fn(Box<dyn Fn() -> String + Send + Sync>),
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::Text(text) => text.clone(),
            EmptyState::Fn(f) => f(),
        }
    }
}

impl From<&str> for EmptyState {
    fn from(text: &str) -> Self {
        EmptyState::Text(text.to_string())
    }
}

pub struct TableConfig<'a, R> {
    pub headers: &'a [HeaderDescriptor<R>],
    pub rows: &'a [R],
    pub empty_state: EmptyState,
    pub get_row_class: Option<RowClassFn<R>>,
    pub striped: bool,
}

impl<'a, R> TableConfig<'a, R> {
    pub fn new(
        headers: &'a [HeaderDescriptor<R>],
        rows: &'a [R],
        empty_state: impl Into<EmptyState>,
    ) -> Self {
        Self {
            headers,
            rows,
            empty_state: empty_state.into(),
            get_row_class: None,
            striped: false,
        }
    }

    pub fn row_class<F>(mut self, get_row_class: F) -> Self
    where
        F: Fn(&R, usize) -> Option<String> + Send + Sync + 'static,
    {
        self.get_row_class = Some(Box::new(get_row_class));
        self
    }

    pub fn striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedHeader {
    pub key: String,
    pub label: String,
    pub class: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub class: Option<String>,
    pub colspan: Option<usize>,
    pub content: CellContent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub class: Option<String>,
    pub cells: Vec<RenderedCell>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub thead: Vec<RenderedHeader>,
    pub tbody: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn to_html(&self) -> TableResult<String> {
        let mut tera = Tera::default();
        tera.add_raw_template("table.html", TABLE_TEMPLATE)?;
        tera.autoescape_on(vec![".html"]);

        let mut context = Context::new();
        context.insert("table", self);
        tera.render("table.html", &context)
    }
}

fn compose_row_class(custom: Option<String>, striped: bool) -> Option<String> {
    match (custom, striped) {
        (Some(custom), true) => Some(format!("{custom} {STRIPE_CLASS}")),
        (Some(custom), false) => Some(custom),
        (None, true) => Some(STRIPE_CLASS.to_string()),
        (None, false) => None,
    }
}

pub fn render<R: TableRow>(config: &TableConfig<'_, R>) -> RenderedTable {
    let thead = config
        .headers
        .iter()
        .map(|header| RenderedHeader {
            key: header.key.clone(),
            label: header.label.clone(),
            class: header.header_class.clone(),
        })
        .collect();

    if config.rows.is_empty() {
        let empty_row = RenderedRow {
            class: None,
            cells: vec![RenderedCell {
                class: Some("text-center".to_string()),
                colspan: Some(config.headers.len().max(1)),
                content: CellContent::Text(config.empty_state.message()),
            }],
        };
        return RenderedTable {
            thead,
            tbody: vec![empty_row],
        };
    }

    let tbody = config
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells = config
                .headers
                .iter()
                .map(|header| {
                    let value = row.cell_value(&header.key);
                    let content = match &header.render {
                        Some(render) => render(
                            row,
                            &CellContext {
                                key: &header.key,
                                row_index,
                                value: value.as_ref(),
                            },
                        ),
                        None => CellContent::from_value(value.as_ref()),
                    };
                    RenderedCell {
                        class: header.cell_class.clone(),
                        colspan: None,
                        content: content.sanitized(),
                    }
                })
                .collect();
            let custom = config
                .get_row_class
                .as_ref()
                .and_then(|get_row_class| get_row_class(row, row_index));
            RenderedRow {
                class: compose_row_class(custom, config.striped && row_index % 2 == 1),
                cells,
            }
        })
        .collect();

    RenderedTable { thead, tbody }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn headers() -> Vec<HeaderDescriptor<RowViewModel>> {
        vec![
            HeaderDescriptor::new("id", "#"),
            HeaderDescriptor::new("client", "Client").header_class("col-client"),
            HeaderDescriptor::new("quoteTotal", "Total").cell_class("text-end"),
        ]
    }

    fn row(id: &str, client: Option<&str>, total: f64) -> RowViewModel {
        let mut row = RowViewModel {
            id: Some(id.to_string()),
            client: client.map(str::to_string),
            ..RowViewModel::default()
        };
        row.fields.insert("quoteTotal", json!(total));
        row
    }

    #[test]
    fn empty_rows_render_a_single_spanning_message_row() {
        let headers = headers();
        let rows: Vec<RowViewModel> = Vec::new();
        let table = render(&TableConfig::new(&headers, &rows, "No quotes found."));

        assert_eq!(table.thead.len(), 3);
        assert_eq!(table.tbody.len(), 1);
        let cells = &table.tbody[0].cells;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].colspan, Some(3));
        assert_eq!(cells[0].content, CellContent::Text("No quotes found.".into()));
    }

    #[test]
    fn empty_state_function_is_called() {
        let headers = headers();
        let rows: Vec<RowViewModel> = Vec::new();
        let config = TableConfig::new(
            &headers,
            &rows,
            EmptyState::Fn(Box::new(|| "Nothing here".to_string())),
        );
        let table = render(&config);
        assert_eq!(
            table.tbody[0].cells[0].content,
            CellContent::Text("Nothing here".into())
        );
    }

    #[test]
    fn cells_stringify_raw_values() {
        let headers = headers();
        let rows = vec![row("#1", None, 12.5)];
        let table = render(&TableConfig::new(&headers, &rows, "none"));

        let cells = &table.tbody[0].cells;
        assert_eq!(cells[0].content, CellContent::Text("#1".into()));
        assert_eq!(cells[1].content, CellContent::Empty);
        assert_eq!(cells[2].content, CellContent::Text("12.5".into()));
        assert_eq!(cells[2].class.as_deref(), Some("text-end"));
        assert_eq!(table.thead[1].class.as_deref(), Some("col-client"));
    }

    #[test]
    fn custom_renderer_output_is_sanitized() {
        let headers = vec![HeaderDescriptor::new("client", "Client").render(
            |row: &RowViewModel, ctx: &CellContext<'_>| {
                CellContent::Html(format!(
                    "<strong>{}</strong><script>alert(1)</script>#{}",
                    row.client.as_deref().unwrap_or_default(),
                    ctx.row_index
                ))
            },
        )];
        let rows = vec![row("#1", Some("Ada"), 1.0)];
        let table = render(&TableConfig::new(&headers, &rows, "none"));

        assert_eq!(
            table.tbody[0].cells[0].content,
            CellContent::Html("<strong>Ada</strong>#0".into())
        );
    }

    #[test]
    fn row_classes_compose_with_striping() {
        let headers = headers();
        let rows = vec![row("#1", None, 1.0), row("#2", None, 2.0), row("#3", None, 3.0)];
        let config = TableConfig::new(&headers, &rows, "none")
            .striped(true)
            .row_class(|row: &RowViewModel, _| (row.id.as_deref() == Some("#2")).then(|| "flagged".to_string()));
        let table = render(&config);

        assert_eq!(table.tbody[0].class, None);
        assert_eq!(
            table.tbody[1].class.as_deref(),
            Some("flagged table-row-striped")
        );
        assert_eq!(table.tbody[2].class, None);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn html_output_escapes_text_cells() {
        let headers = headers();
        let rows = vec![row("#1", Some("<b>Bob</b>"), 1.0)];
        let html = render(&TableConfig::new(&headers, &rows, "none"))
            .to_html()
            .unwrap();

        assert!(html.contains("&lt;b&gt;Bob&lt;&#x2F;b&gt;"));
        assert!(html.contains(r#"<th class="col-client">Client</th>"#));
        assert!(html.contains(r#"<td class="text-end">1.0</td>"#));
    }

    #[test]
    fn html_output_for_empty_table() {
        let headers = headers();
        let rows: Vec<RowViewModel> = Vec::new();
        let html = render(&TableConfig::new(&headers, &rows, "No quotes found."))
            .to_html()
            .unwrap();
        assert!(html.contains(r#"<td colspan="3" class="text-center">No quotes found.</td>"#));
    }
}
