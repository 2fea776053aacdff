//! Surface debug visualization: 2D image rendering of generated grids.
//!
//! Provides [`DebugImage`] and renderers that turn a [`SurfaceGrid`](crate::SurfaceGrid)
//! into RGBA pixels, plus PNG encoding for dumping textures to disk.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{elevation_to_color, render_elevation, render_surface};
