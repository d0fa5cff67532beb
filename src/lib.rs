//! Real-time pan/zoom/rotate transform engine for raw video frames.
//!
//! Maps every output pixel through a simulated camera (position, three-axis
//! rotation, field of view, zoom) back into the input image and samples it
//! nearest-neighbor, across planar 4:2:0 YUV and the common packed 3/4-byte
//! layouts. A duration-driven motion clip can drive the pan/zoom instead,
//! with a choice of timing curves.

#![forbid(unsafe_code)]

pub mod ease;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod params;
pub mod project;
pub mod sample;

pub use ease::PanMethod;
pub use engine::TransformEngine;
pub use error::{ZoompanError, ZoompanResult};
pub use format::{FormatFamily, PixelFormat};
pub use frame::{Frame, FrameRef, FrameRefMut};
pub use params::{CameraParams, CropRect, MotionClip};
pub use project::Projection;
pub use sample::Sampler;
