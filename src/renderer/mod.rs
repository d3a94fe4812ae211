//! WebGPU rendering module
//!
//! The scene is built on the CPU as textured triangle lists in screen pixels,
//! one batch per texture, then uploaded and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{Frame, Layer, build_frame};
pub use text::{FontAtlas, FontError};
pub use vertex::Vertex;
