//! Pen, font and alignment values which callers pass straight through to a backend

use crate::{geom::clamp_non_negative, Color};

/// How the vertices of a polyline or polygon are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Where the text anchor sits horizontally, relative to the text's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Where the text anchor sits vertically, relative to the text's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Font weight on the usual 100-900 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FontWeight(pub f64);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400.0);
    pub const BOLD: FontWeight = FontWeight(700.0);

    pub fn is_bold(self) -> bool {
        self.0 > 500.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Everything needed to lay out and measure a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::NORMAL,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::BOLD;
        self
    }

    /// The font size with any contract violation (negative or NaN) clamped to zero
    pub(crate) fn effective_size(&self) -> f64 {
        if self.size.is_nan() || self.size < 0.0 {
            log::warn!("Negative font size {} clamped to 0", self.size);
        }
        clamp_non_negative(self.size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 12.0)
    }
}

/// The outline settings for polylines and polygons
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub thickness: f64,
    /// Alternating on/off lengths, in multiples of `thickness`.  `None` means a solid stroke.
    pub dash_pattern: Option<Vec<f64>>,
    pub line_join: LineJoin,
    /// Request crisp, non-antialiased rendering.  This is a hint; backends do their best.
    pub aliased: bool,
}

impl LineStyle {
    /// A solid, antialiased, miter-joined stroke
    pub fn solid(color: Color, thickness: f64) -> Self {
        Self {
            color,
            thickness,
            dash_pattern: None,
            line_join: LineJoin::Miter,
            aliased: false,
        }
    }

    /// An invisible stroke (i.e. polygons drawn with this are fill-only)
    pub fn none() -> Self {
        Self::solid(Color::UNDEFINED, 0.0)
    }

    pub fn dashed(mut self, pattern: impl Into<Vec<f64>>) -> Self {
        self.dash_pattern = Some(pattern.into());
        self
    }

    pub fn with_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    pub fn aliased(mut self, aliased: bool) -> Self {
        self.aliased = aliased;
        self
    }

    /// The [`StrokeStyle`] this would paint with, or `None` if it wouldn't produce any marks
    pub fn stroke(&self) -> Option<StrokeStyle> {
        StrokeStyle::resolve(self.color, self.thickness)
    }

    /// Returns the dash pattern, unless it is empty or has no 'on' length (in which case the line
    /// is drawn solid).  An odd-length pattern is repeated to make it even, so each of its entries
    /// is used as both an 'on' and an 'off' length.
    pub fn effective_dash_pattern(&self) -> Option<&[f64]> {
        self.dash_pattern.as_deref().filter(|p| {
            let on_lengths_step = if p.len() % 2 == 0 { 2 } else { 1 };
            p.iter().step_by(on_lengths_step).any(|&len| len > 0.0)
        })
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

//////////////////////
// PAINT RESOLUTION //
//////////////////////

/// A fully resolved, visible stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub thickness: f64,
}

impl StrokeStyle {
    /// Returns `None` if a stroke with this colour and thickness would be invisible.  Negative
    /// thicknesses are a caller error and are clamped (to zero, so they also produce `None`).
    pub fn resolve(color: Color, thickness: f64) -> Option<Self> {
        if thickness < 0.0 || thickness.is_nan() {
            log::warn!("Invalid stroke thickness {} clamped to 0", thickness);
        }
        let thickness = clamp_non_negative(thickness);
        (color.is_visible() && thickness > 0.0).then(|| StrokeStyle { color, thickness })
    }
}

/// Which aspects of a closed shape get painted.  A shape with neither a visible fill nor a
/// visible stroke has no `Style` at all, so invisible shapes can't be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Style<F, S> {
    JustFill(F),
    JustStroke(S),
    FillAndStroke(F, S),
}

impl<F, S> Style<F, S> {
    pub fn fill_style(&self) -> Option<&F> {
        match self {
            Self::JustFill(f) => Some(f),
            Self::JustStroke(_) => None,
            Self::FillAndStroke(f, _) => Some(f),
        }
    }

    pub fn stroke_style(&self) -> Option<&S> {
        match self {
            Self::JustFill(_) => None,
            Self::JustStroke(s) => Some(s),
            Self::FillAndStroke(_, s) => Some(s),
        }
    }

    fn from_parts(fill: Option<F>, stroke: Option<S>) -> Option<Self> {
        match (fill, stroke) {
            (Some(f), Some(s)) => Some(Self::FillAndStroke(f, s)),
            (Some(f), None) => Some(Self::JustFill(f)),
            (None, Some(s)) => Some(Self::JustStroke(s)),
            (None, None) => None,
        }
    }
}

/// The resolved paint of a shape drawn with a plain colour and stroke
pub type Paint = Style<Color, StrokeStyle>;

impl Paint {
    /// Decides what to paint for a shape given its fill, stroke colour and stroke thickness.
    /// Returns `None` when the whole draw call is a no-op.
    pub fn resolve(fill: Color, stroke: Color, thickness: f64) -> Option<Self> {
        let fill = fill.is_visible().then(|| fill);
        Self::from_parts(fill, StrokeStyle::resolve(stroke, thickness))
    }
}

/// The resolved paint of a polyline or polygon, where the stroke carries dashes and joins
pub type LinePaint<'s> = Style<Color, (StrokeStyle, &'s LineStyle)>;

impl<'s> LinePaint<'s> {
    pub fn resolve_line(fill: Color, line: &'s LineStyle) -> Option<Self> {
        let fill = fill.is_visible().then(|| fill);
        Self::from_parts(fill, line.stroke().map(|s| (s, line)))
    }
}
