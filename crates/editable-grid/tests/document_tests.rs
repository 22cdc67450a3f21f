//! Loading grid documents from disk and reading configuration files.

use std::io::Write;

use editable_grid::{
    ActiveEditPolicy, EditableGrid, FileTransport, GridConfig, GridError, HostDocument,
    MemoryDocument, PointerKind,
};

const GRID_XML: &str = "<grid>
  <metadatas>
    <column><name>city</name><label>City</label><datatype>string</datatype><editable>no</editable></column>
    <column><name>pop</name><label>Population</label><datatype>number</datatype><editable>YES</editable></column>
  </metadatas>
  <row><column>Lyon</column><column>522250</column></row>
  <row><column>Nantes</column><column>320732</column></row>
</grid>";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("editable_grid=debug")
        .with_test_writer()
        .try_init();
}

fn new_grid() -> EditableGrid<MemoryDocument> {
    let mut doc = MemoryDocument::new();
    doc.add_container("grid");
    let mut grid = EditableGrid::new(doc, GridConfig::new("grid"));
    grid.init().unwrap();
    grid
}

#[tokio::test]
async fn test_load_from_path_and_file_url() {
    init_tracing();
    let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
    file.write_all(GRID_XML.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut grid = new_grid();
    let mut calls = 0;
    grid.load(&path, Some(|| calls += 1)).await.unwrap();
    assert_eq!(calls, 1);
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.get_value(1, 0).unwrap(), Some("Nantes"));
    assert!(!grid.model().is_column_editable(0));
    assert!(grid.model().is_column_editable(1));

    let mut grid = new_grid();
    grid.load(&format!("file://{path}"), None::<fn()>).await.unwrap();
    assert_eq!(grid.get_value(0, 1).unwrap(), Some("522250"));
}

#[tokio::test]
async fn test_load_relative_to_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cities.xml"), GRID_XML).unwrap();

    let mut grid = new_grid();
    let transport = FileTransport::with_base_dir(dir.path());
    grid.load_with(&transport, "cities.xml", None::<fn()>).await.unwrap();
    assert_eq!(grid.column_count(), 2);
}

#[tokio::test]
async fn test_missing_file_raises_notice() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("absent.xml");

    let mut grid = new_grid();
    let err = grid
        .load(location.to_str().unwrap(), None::<fn()>)
        .await
        .unwrap_err();

    assert!(matches!(err, GridError::LoadFailure(_)));
    assert_eq!(grid.host().notices().len(), 1);
    assert!(grid.host().notices()[0].contains("document not found"));
    let container = grid.host().element_by_id("grid").unwrap();
    assert!(grid.host().children(container).unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_container_fails_load_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cities.xml");
    std::fs::write(&path, GRID_XML).unwrap();

    let mut grid = EditableGrid::new(MemoryDocument::new(), GridConfig::new("nowhere"));
    let err = grid.load(path.to_str().unwrap(), None::<fn()>).await.unwrap_err();

    assert!(matches!(err, GridError::ContainerNotFound { .. }));
    assert_eq!(grid.row_count(), 0);
    assert_eq!(grid.host().notices(), ["Unable to get element [nowhere]"]);
}

#[test]
fn test_config_files() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("grid.toml");
    std::fs::write(
        &toml_path,
        "container_id = \"tablecontent\"\nedit_trigger = \"double_click\"\nactive_edit_policy = \"cancel_previous\"\n",
    )
    .unwrap();
    let json_path = dir.path().join("grid.json");
    std::fs::write(
        &json_path,
        r#"{"container_id": "tablecontent", "edit_trigger": "double_click", "active_edit_policy": "cancel_previous"}"#,
    )
    .unwrap();

    let from_toml = GridConfig::from_path(&toml_path).unwrap();
    let from_json = GridConfig::from_path(&json_path).unwrap();
    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml.edit_trigger, PointerKind::DoubleClick);
    assert_eq!(from_toml.active_edit_policy, ActiveEditPolicy::CancelPrevious);
    assert_eq!(from_toml.table_class, GridConfig::DEFAULT_TABLE_CLASS);
}
