//! Grid document loading.
//!
//! A grid document declares the columns (name, label, data type and
//! whether the column can be edited) and the raw values of every row.
//! Two encodings are understood:
//!
//! ```xml
//! <editablegrid>
//!   <metadata>
//!     <column><name>qty</name><label>Quantity</label><datatype>number</datatype><editable>true</editable></column>
//!     <column><name>desc</name><label>Description</label><datatype>string</datatype></column>
//!   </metadata>
//!   <data>
//!     <row><column>5</column><column>apple</column></row>
//!   </data>
//! </editablegrid>
//! ```
//!
//! and a JSON equivalent with a `metadata` array of column objects and a
//! `data` array of rows.
//!
//! Loading is all or nothing: any malformed piece fails the whole document
//! and no [`GridModel`] is produced.

mod error;
mod json;
mod xml;

use editable_grid_core::DocumentTransport;
use editable_grid_core::PerfSpan;
use editable_grid_core::logging::targets;

pub use error::{LoadError, LoadResult};
pub use xml::{XmlElement, XmlNode, parse_xml};

use crate::delegate::DelegateRegistry;
use crate::model::{ColumnDescriptor, DataType, GridModel};

/// Encoding of a grid document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Xml,
    Json,
}

impl DocumentFormat {
    /// Guesses the format from the first non-whitespace character.
    pub fn detect(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '<' => Some(Self::Xml),
            '{' => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedColumn {
    pub name: String,
    pub label: String,
    pub datatype: String,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ParsedDocument {
    pub columns: Vec<ParsedColumn>,
    pub rows: Vec<Vec<String>>,
}

/// Parses an `editable` flag.
///
/// Accepts `true`/`yes`/`1` and `false`/`no`/`0`, ignoring case and
/// surrounding whitespace.
pub(crate) fn parse_editable(column: usize, value: &str) -> LoadResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(LoadError::InvalidEditable {
            column,
            value: value.to_string(),
        }),
    }
}

/// Names accepted for the metadata section.
const METADATA_SECTIONS: [&str; 2] = ["metadata", "metadatas"];

fn parse_xml_document(text: &str) -> LoadResult<ParsedDocument> {
    let root = parse_xml(text)?;
    let metadata = METADATA_SECTIONS
        .iter()
        .find_map(|section| root.find(section))
        .ok_or(LoadError::MissingSection {
            section: "metadata",
        })?;

    let columns = metadata
        .children_by_name("column")
        .enumerate()
        .map(|(index, column)| -> LoadResult<ParsedColumn> {
            let required = |field: &'static str| {
                column
                    .child(field)
                    .map(|el| el.text().trim().to_string())
                    .ok_or(LoadError::MissingField {
                        column: index,
                        field,
                    })
            };
            let editable = match column.child("editable") {
                Some(flag) => parse_editable(index, &flag.text())?,
                None => false,
            };
            Ok(ParsedColumn {
                name: required("name")?,
                label: required("label")?,
                datatype: required("datatype")?,
                editable,
            })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let mut row_elements = Vec::new();
    root.find_all(
        "row",
        &|el| METADATA_SECTIONS.contains(&el.name()),
        &mut row_elements,
    );
    let rows = row_elements
        .into_iter()
        .map(|row| row.children_by_name("column").map(XmlElement::text).collect())
        .collect();

    Ok(ParsedDocument { columns, rows })
}

/// Turns grid documents into [`GridModel`]s.
///
/// Renderers and editors are chosen per column through the loader's
/// [`DelegateRegistry`]. Only editable columns get an editor factory.
#[derive(Debug, Clone, Default)]
pub struct MetadataLoader {
    registry: DelegateRegistry,
}

impl MetadataLoader {
    /// A loader using the built-in delegates.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader using `registry` to pick delegates.
    pub fn with_registry(registry: DelegateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DelegateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DelegateRegistry {
        &mut self.registry
    }

    /// Parses a document, detecting its format.
    pub fn parse(&self, text: &str) -> LoadResult<GridModel> {
        let format = DocumentFormat::detect(text).ok_or(LoadError::UnknownFormat)?;
        self.parse_as(text, format)
    }

    /// Parses a document of a known format.
    pub fn parse_as(&self, text: &str, format: DocumentFormat) -> LoadResult<GridModel> {
        let parsed = match format {
            DocumentFormat::Xml => parse_xml_document(text)?,
            DocumentFormat::Json => json::parse_json(text)?,
        };
        let model = self.build(parsed)?;
        tracing::debug!(
            target: targets::LOADER,
            ?format,
            columns = model.column_count(),
            rows = model.row_count(),
            "grid document parsed"
        );
        Ok(model)
    }

    /// Fetches `location` through `transport` and parses the result.
    pub async fn load<T>(&self, transport: &T, location: &str) -> LoadResult<GridModel>
    where
        T: DocumentTransport,
    {
        let _span = PerfSpan::new("load");
        tracing::info!(target: targets::LOADER, location, "loading grid document");
        let text = transport.fetch(location).await?;
        self.parse(&text)
    }

    fn build(&self, parsed: ParsedDocument) -> LoadResult<GridModel> {
        let columns = parsed
            .columns
            .into_iter()
            .map(|column| {
                let datatype = DataType::from(column.datatype.as_str());
                let mut descriptor =
                    ColumnDescriptor::new(column.name, column.label, datatype.clone())
                        .with_renderer(self.registry.renderer_for(&datatype));
                if column.editable {
                    descriptor = descriptor.with_editor(self.registry.editor_for(&datatype));
                }
                descriptor
            })
            .collect::<Vec<_>>();

        let expected = columns.len();
        GridModel::new(columns, parsed.rows).map_err(|(row, found)| LoadError::RowLength {
            row,
            expected,
            found,
        })
    }
}
