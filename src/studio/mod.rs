//! Script editing, audio rendering and playback state for a generated episode.

mod editor;
mod operation;
mod session;
mod transport;

pub use editor::ScriptEditor;
pub use operation::{CancellationSource, CancellationToken, OperationState};
pub use session::{
    Studio, SynthesisJob, DEFAULT_PREVIEW_LINES, PREVIEW_ERROR, RENDER_ERROR,
};
pub use transport::{format_time, PlaybackState, Transport};
