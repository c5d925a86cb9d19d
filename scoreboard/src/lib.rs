pub mod control;
pub mod format;
pub mod glyph;
pub mod projector;
pub mod scorecard;
pub mod signal;
pub mod view_model;

pub use projector::{Projector, ProjectionError, project, project_default};
pub use signal::{ActionKind, Prompt, Reaction, Scoreboard, Signal};
pub use view_model::ViewModel;
