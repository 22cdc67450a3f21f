//! The grid facade.

use editable_grid_core::DocumentTransport;
use editable_grid_core::logging::targets;

use crate::config::GridConfig;
use crate::controller::{ClickOutcome, EditState, InteractionController, KeyOutcome};
use crate::error::{GridError, Result};
use crate::host::{ElementId, HostDocument, Key, PointerEvent};
use crate::loader::{LoadError, MetadataLoader};
use crate::model::{DataType, GridModel, ModelSignals};
use crate::render::TableRenderer;
use crate::transport::AutoTransport;

/// An editable table bound to a container of a host document.
///
/// The usual sequence is [`init`](Self::init) to bind the container, then
/// [`load`](Self::load) to fetch, parse and render a grid document. The
/// host forwards pointer and key events to
/// [`mouse_clicked`](Self::mouse_clicked) and
/// [`key_pressed`](Self::key_pressed).
///
/// ```ignore
/// let mut doc = MemoryDocument::new();
/// doc.add_container("tablecontent");
///
/// let mut grid = EditableGrid::new(doc, GridConfig::new("tablecontent"));
/// grid.init()?;
/// grid.load("grid.xml", Some(|| println!("loaded"))).await?;
/// ```
///
/// Failures that reach the user (missing container, failed load, click on
/// a read-only column) are raised as host notices as well as returned.
pub struct EditableGrid<H: HostDocument> {
    host: H,
    config: GridConfig,
    model: GridModel,
    loader: MetadataLoader,
    renderer: TableRenderer,
    controller: InteractionController,
    transport: AutoTransport,
    container: Option<ElementId>,
    table: Option<ElementId>,
}

impl<H: HostDocument> EditableGrid<H> {
    /// Creates an unbound, empty grid.
    pub fn new(host: H, config: GridConfig) -> Self {
        Self {
            host,
            renderer: TableRenderer::new(config.table_class.clone()),
            controller: InteractionController::new(&config),
            config,
            model: GridModel::empty(),
            loader: MetadataLoader::new(),
            transport: AutoTransport::new(),
            container: None,
            table: None,
        }
    }

    /// Uses `loader` (and its delegate registry) for later loads.
    pub fn with_loader(mut self, loader: MetadataLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Uses `transport` for [`load`](Self::load).
    pub fn with_transport(mut self, transport: AutoTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Binds the grid to its container so that events are handled.
    pub fn init(&mut self) -> Result<()> {
        match self.host.element_by_id(&self.config.container_id) {
            Some(container) => {
                self.container = Some(container);
                editable_grid_core::grid_info!(
                    container = %self.config.container_id,
                    trigger = ?self.config.edit_trigger,
                    "grid bound to container"
                );
                Ok(())
            }
            None => {
                self.container = None;
                let err = GridError::ContainerNotFound {
                    container_id: self.config.container_id.clone(),
                };
                Err(self.report(err))
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.container.is_some()
    }

    /// Fetches the document at `location`, replaces the model and renders it.
    ///
    /// `http(s)://` locations need the `http` feature; `file://` URLs and
    /// bare paths are read from disk. `on_complete` runs after the table is
    /// in place. On failure a notice is raised, `on_complete` is not called,
    /// and the previous model and table are untouched.
    pub async fn load<F>(&mut self, location: &str, on_complete: Option<F>) -> Result<()>
    where
        F: FnOnce(),
    {
        let transport = self.transport.clone();
        self.load_with(&transport, location, on_complete).await
    }

    /// Like [`load`](Self::load) with a caller-chosen transport.
    pub async fn load_with<T, F>(
        &mut self,
        transport: &T,
        location: &str,
        on_complete: Option<F>,
    ) -> Result<()>
    where
        T: DocumentTransport,
        F: FnOnce(),
    {
        let loaded = match self.loader.load(transport, location).await {
            Ok(model) => model,
            Err(LoadError::Transport(err)) if err.is_unsupported() => {
                let err = GridError::LoadTransportUnsupported {
                    location: location.to_string(),
                };
                return Err(self.report(err));
            }
            Err(err) => return Err(self.report(err.into())),
        };

        let table = match self
            .renderer
            .render(&mut self.host, &loaded, &self.config.container_id)
        {
            Ok(table) => table,
            Err(err) => return Err(self.report(err)),
        };

        if let Err(err) = self.controller.cancel(&mut self.host, &self.model) {
            tracing::warn!(target: targets::GRID, error = %err, "could not close previous edit");
        }
        self.model.replace_contents(loaded);
        self.controller.reset(self.model.column_count());
        self.table = Some(table);
        tracing::info!(
            target: targets::GRID,
            location,
            rows = self.model.row_count(),
            columns = self.model.column_count(),
            "grid loaded"
        );

        if let Some(on_complete) = on_complete {
            on_complete();
        }
        Ok(())
    }

    /// Renders the current model again, appending another table.
    ///
    /// An active edit is cancelled and events are routed to the new table
    /// from then on.
    pub fn render_table(&mut self) -> Result<ElementId> {
        let table = match self
            .renderer
            .render(&mut self.host, &self.model, &self.config.container_id)
        {
            Ok(table) => table,
            Err(err) => return Err(self.report(err)),
        };
        if let Err(err) = self.controller.cancel(&mut self.host, &self.model) {
            tracing::warn!(target: targets::GRID, error = %err, "could not close previous edit");
        }
        self.table = Some(table);
        Ok(table)
    }

    /// The table that receives events, once one has been rendered.
    pub fn table(&self) -> Option<ElementId> {
        self.table
    }

    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.model.column_count()
    }

    /// See [`GridModel::get_value`].
    pub fn get_value(&self, row: usize, column: usize) -> Result<Option<&str>> {
        self.model.get_value(row, column)
    }

    /// Writes to the model only; the rendered table is not refreshed.
    pub fn set_value(&mut self, value: impl Into<String>, row: usize, column: usize) -> Result<()> {
        self.model.set_value(value, row, column)
    }

    pub fn column_type(&self, column: usize) -> Result<&DataType> {
        self.model.column_type(column)
    }

    /// Handles a pointer event. Ignored until the grid is initialized and
    /// a table has been rendered; only cells of the most recent table
    /// respond.
    pub fn mouse_clicked(&mut self, event: PointerEvent) -> Result<ClickOutcome> {
        let (Some(_), Some(table)) = (self.container, self.table) else {
            editable_grid_core::grid_trace!("pointer event ignored, grid not bound or not rendered");
            return Ok(ClickOutcome::Ignored);
        };
        match self
            .controller
            .mouse_clicked(&mut self.host, &mut self.model, table, event)
        {
            Ok(outcome) => Ok(outcome),
            Err(err) => Err(self.report(err)),
        }
    }

    /// Handles a key press on the active editor.
    pub fn key_pressed(&mut self, key: Key) -> Result<KeyOutcome> {
        match self
            .controller
            .key_pressed(&mut self.host, &mut self.model, key)
        {
            Ok(outcome) => Ok(outcome),
            Err(err) => Err(self.report(err)),
        }
    }

    /// Starts editing `(row, column)` as if its cell had been clicked.
    pub fn begin_edit(&mut self, row: usize, column: usize) -> Result<()> {
        if self.container.is_none() {
            return Err(GridError::ContainerNotFound {
                container_id: self.config.container_id.clone(),
            });
        }
        let table = self
            .table
            .ok_or(GridError::CellNotRendered { row, column })?;
        self.controller
            .begin_edit(&mut self.host, &mut self.model, table, row, column)
    }

    /// Commits the active edit, if any.
    pub fn commit_edit(&mut self) -> Result<()> {
        self.controller.commit(&mut self.host, &mut self.model)
    }

    /// Cancels the active edit, if any.
    pub fn cancel_edit(&mut self) -> Result<()> {
        self.controller.cancel(&mut self.host, &self.model)
    }

    pub fn edit_state(&self) -> EditState {
        self.controller.state()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn signals(&self) -> &ModelSignals {
        self.model.signals()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the grid, returning its host.
    pub fn into_host(self) -> H {
        self.host
    }

    fn report(&mut self, err: GridError) -> GridError {
        editable_grid_core::grid_warn!(error = %err, "grid error");
        self.host.notify(&err.to_string());
        err
    }
}

impl<H: HostDocument + std::fmt::Debug> std::fmt::Debug for EditableGrid<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableGrid")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("model", &self.model)
            .field("controller", &self.controller)
            .field("container", &self.container)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
