pub mod backend;
pub mod compose;
pub mod cpu;
pub mod layout;
pub mod options;
pub mod scene;
pub mod text;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use compose::{compose_diagram, compose_frame, compose_tile};
pub use cpu::CpuBackend;
pub use options::{Accent, DiagramMode, DisplayOptions};
pub use scene::{DrawOp, Scene, TextAnchor};
pub use text::LabelFont;
