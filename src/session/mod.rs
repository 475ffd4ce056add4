//! One annotation session: the image being marked up plus its store and
//! controller. Loading another image starts a fresh session.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use crate::annotation::{AnnotationId, CanvasPoint, Color};
use crate::config::AnnotatorConfig;
use crate::history::{HistoryResult, SessionLog, SessionRecord};
use crate::interaction::{InteractionController, PointerOutcome, TextCommit, ToolMode};
use crate::render::RenderFrame;
use crate::store::AnnotationStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub struct Session {
    dimensions: ImageDimensions,
    source_path: Option<PathBuf>,
    store: AnnotationStore,
    controller: InteractionController,
}

impl Session {
    pub fn new(dimensions: ImageDimensions, config: &AnnotatorConfig) -> SessionResult<Self> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(SessionError::EmptyImage {
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        let controller = InteractionController::with_defaults(
            config.default_color.color(),
            config.text_font_size,
        );
        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            "annotation session started"
        );
        Ok(Self {
            dimensions,
            source_path: None,
            store: AnnotationStore::new(),
            controller,
        })
    }

    pub fn from_image(image: &DynamicImage, config: &AnnotatorConfig) -> SessionResult<Self> {
        let (width, height) = image.dimensions();
        Self::new(ImageDimensions { width, height }, config)
    }

    pub fn open(path: impl AsRef<Path>, config: &AnnotatorConfig) -> SessionResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| SessionError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let mut session = Self::from_image(&image, config)?;
        session.source_path = Some(path.to_path_buf());
        tracing::info!(?path, "image opened for annotation");
        Ok(session)
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn pointer_down(&mut self, point: CanvasPoint, click_count: u32) -> PointerOutcome {
        self.controller
            .pointer_down(&mut self.store, point, click_count)
    }

    pub fn pointer_drag(&mut self, point: CanvasPoint) -> PointerOutcome {
        self.controller.pointer_drag(&mut self.store, point)
    }

    pub fn pointer_up(&mut self, point: CanvasPoint) -> PointerOutcome {
        self.controller.pointer_up(&mut self.store, point)
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        self.controller.set_tool_mode(mode);
    }

    pub fn set_color(&mut self, color: Color) {
        self.controller.set_color(color);
    }

    pub fn cancel(&mut self) {
        self.controller.cancel();
    }

    pub fn escape(&mut self) {
        self.controller.escape();
    }

    pub fn commit_text(&mut self, id: AnnotationId, text: impl Into<String>) -> TextCommit {
        self.controller.commit_text(&mut self.store, id, text)
    }

    pub fn undo(&mut self) -> bool {
        self.controller.undo(&mut self.store)
    }

    pub fn redo(&mut self) -> bool {
        self.controller.redo(&mut self.store)
    }

    pub fn delete_selected(&mut self) -> bool {
        self.controller.delete_selected(&mut self.store)
    }

    pub fn clear_all(&mut self) -> bool {
        self.controller.clear_all(&mut self.store)
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::capture(&self.store, &self.controller)
    }

    /// Metadata for the history log. Empty labels still being typed are not
    /// counted.
    pub fn record(&self) -> SessionRecord {
        let annotation_count = self
            .store
            .annotations()
            .iter()
            .filter(|annotation| annotation.as_text().map_or(true, |text| !text.is_empty()))
            .count();
        SessionRecord::new(self.dimensions.width, self.dimensions.height, annotation_count)
    }

    pub fn commit(&self, log: &mut impl SessionLog) -> HistoryResult<SessionRecord> {
        let record = self.record();
        log.append(record.clone())?;
        tracing::info!(
            session = %record.id,
            annotations = record.annotation_count,
            "session recorded"
        );
        Ok(record)
    }
}
