//! A backend-agnostic contract for 2D vector drawing.
//!
//! Chart code talks to a [`RenderContext`], which any output (an SVG document, a raster canvas, a
//! native window) can implement by supplying six primitives.  Batched operations such as
//! [`RenderContext::draw_rectangles`] come for free and are dispatched in paint order.

use vector2d::Vector2D;

mod color;
pub mod context;
mod error;
pub mod geom;
pub mod recording;
pub mod style;
pub mod svg;
pub mod text;

pub use color::Color;
pub use context::{Canvas, RenderContext};
pub use error::{Error, Result};
pub use geom::{Rect, Size};
pub use recording::{DrawCommand, RecordingContext};
pub use style::{Font, FontWeight, HorizontalAlign, LineJoin, LineStyle, VerticalAlign};
pub use svg::{SvgOptions, SvgRenderContext};
pub use text::{FontMetrics, TextLayout, TextMeasurer};

/// Type alias for 2D points in device space (in the geometric sense, unlike [`Vec`])
pub type V2 = Vector2D<f64>;
