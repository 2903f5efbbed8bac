//! The contract between chart-drawing code and a rendering backend.
//!
//! A backend implements six primitives ([`draw_ellipse`], [`draw_line`], [`draw_polygon`],
//! [`draw_rectangle`], [`draw_text`] and [`measure_text`]) and gets the batched operations for
//! free.  The batched versions dispatch to the primitives one item at a time, in input order, so
//! that later shapes paint over earlier ones.  Backends may override them with something faster
//! as long as that paint order is preserved.
//!
//! [`draw_ellipse`]: RenderContext::draw_ellipse
//! [`draw_line`]: RenderContext::draw_line
//! [`draw_polygon`]: RenderContext::draw_polygon
//! [`draw_rectangle`]: RenderContext::draw_rectangle
//! [`draw_text`]: RenderContext::draw_text
//! [`measure_text`]: RenderContext::measure_text

use angle::Deg;
use itertools::Itertools;

use crate::{
    style::{Font, HorizontalAlign, LineStyle, VerticalAlign},
    Color, Error, Rect, Result, Size, V2,
};

/// The state shared by every drawing session: the size of the output surface and whether the
/// background should be painted.  This is fixed when the backend is created; callers can only
/// read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    paint_background: bool,
}

impl Canvas {
    /// Creates a `Canvas` of the given size, which doesn't paint its background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is negative, infinite or NaN.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            paint_background: false,
        })
    }

    pub fn with_paint_background(mut self, paint_background: bool) -> Self {
        self.paint_background = paint_background;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn paint_background(&self) -> bool {
        self.paint_background
    }

    /// The whole drawable area, with its top-left corner at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Used by backends whose surface gets resized.  This is deliberately not reachable through
    /// [`RenderContext`].
    pub(crate) fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

fn check_dimensions(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

/// A rendering backend.  All coordinates are in device space, in the same units as
/// [`Canvas::width`] and [`Canvas::height`].
///
/// No drawing operation can fail.  Degenerate input (empty point lists, empty text, invisible
/// colours, zero thickness) makes the call, or the relevant aspect of it, a no-op.
pub trait RenderContext {
    /// The session state of this backend
    fn canvas(&self) -> &Canvas;

    fn width(&self) -> f64 {
        self.canvas().width()
    }

    fn height(&self) -> f64 {
        self.canvas().height()
    }

    fn paint_background(&self) -> bool {
        self.canvas().paint_background()
    }

    /* PRIMITIVES */

    /// Draws the ellipse inscribed in `rect`
    fn draw_ellipse(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64);

    /// Draws an open polyline through `points`, in order.  Fewer than two points is a no-op.
    fn draw_line(&mut self, points: &[V2], line: &LineStyle);

    /// Draws the closed polygon through `points`, with an implicit edge from the last point back
    /// to the first.
    fn draw_polygon(&mut self, points: &[V2], fill: Color, line: &LineStyle);

    fn draw_rectangle(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64);

    /// Draws `text` so that `position` sits at the point of the (unrotated) text box given by
    /// `halign` and `valign`, then rotates the text clockwise by `rotation` around `position`.
    /// If `max_size` is given, the text is scaled down or clipped to fit inside it.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        position: V2,
        text: &str,
        fill: Color,
        font: &Font,
        rotation: Deg<f64>,
        halign: HorizontalAlign,
        valign: VerticalAlign,
        max_size: Option<Size>,
    );

    /// Returns the natural, unrotated size of `text` when drawn with `font`.  This must agree
    /// with the layout used by [`draw_text`](Self::draw_text), and must not depend on colour.
    fn measure_text(&self, text: &str, font: &Font) -> Size;

    /* BATCHED OPERATIONS */

    /// Draws an ellipse in each of `rects`, in order
    fn draw_ellipses(&mut self, rects: &[Rect], fill: Color, stroke: Color, thickness: f64) {
        for &rect in rects {
            self.draw_ellipse(rect, fill, stroke, thickness);
        }
    }

    /// Draws disjoint line segments between the points `(0, 1)`, `(2, 3)`, `(4, 5)`, etc.  If
    /// `points` has odd length, the last point is ignored.
    fn draw_line_segments(&mut self, points: &[V2], line: &LineStyle) {
        for (&p1, &p2) in points.iter().tuples() {
            self.draw_line(&[p1, p2], line);
        }
    }

    fn draw_polygons(&mut self, polygons: &[Vec<V2>], fill: Color, line: &LineStyle) {
        for polygon in polygons {
            self.draw_polygon(polygon, fill, line);
        }
    }

    fn draw_rectangles(&mut self, rects: &[Rect], fill: Color, stroke: Color, thickness: f64) {
        for &rect in rects {
            self.draw_rectangle(rect, fill, stroke, thickness);
        }
    }

    /* INTERACTION */

    /// Attaches a tooltip to everything drawn after this call.  Only interactive backends do
    /// anything with this.
    fn set_tool_tip(&mut self, _text: &str) {}
}
