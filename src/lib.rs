pub mod annotation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod logging;
pub mod render;
pub mod session;
pub mod store;

use std::path::Path;

pub use annotation::{Annotation, AnnotationId, AnnotationKind};
pub use config::{load_annotator_config, AnnotatorConfig};
pub use error::{AppError, AppResult};
pub use geometry::{AnnotationColor, CanvasPoint, CanvasRect, Color};
pub use history::{JsonSessionLog, SessionLog, SessionRecord};
pub use interaction::{InteractionController, InteractionState, PointerOutcome, ToolMode};
pub use render::{DrawCommand, RenderFrame, Renderer};
pub use session::Session;
pub use store::AnnotationStore;

/// Entrypoint used by embedding UIs: installs logging, loads the user config
/// and opens `path` as a fresh annotation session.
pub fn start_session(path: impl AsRef<Path>) -> AppResult<Session> {
    logging::init();
    let config = load_annotator_config();
    let session = Session::open(path, &config)?;
    Ok(session)
}

/// Appends `session` to the default on-disk history log.
pub fn finish_session(session: &Session) -> AppResult<SessionRecord> {
    let config = load_annotator_config();
    let mut log = JsonSessionLog::with_default_path(config.max_history_sessions)?;
    let record = session.commit(&mut log)?;
    Ok(record)
}
