//! Slateboard Core Library
//!
//! Platform-agnostic state and logic for the Slateboard whiteboard:
//! snapshot history, the tool state machine, and the surface seam the
//! render backend plugs into.

pub mod annotation;
pub mod board;
pub mod color;
pub mod config;
pub mod history;
pub mod input;
pub mod present;
pub mod shapes;
pub mod snapshot;
pub mod style;
pub mod surface;
pub mod tools;

pub use annotation::TextAnnotation;
pub use board::Board;
pub use color::Rgba;
pub use config::BoardConfig;
pub use history::History;
pub use input::PointerEvent;
pub use present::{PresentToken, Presenter};
pub use shapes::{PendingShape, ShapeKind};
pub use snapshot::{EncodedImage, Snapshot};
pub use style::StrokeStyle;
pub use surface::{Surface, SurfaceError, SurfaceResult};
pub use tools::{ToolKind, ToolManager, ToolState};
