//! Text measurement and alignment.  Backends that don't have access to real glyph metrics can use
//! [`FontMetrics`], and every backend can use [`TextLayout`] to turn an anchor point and
//! alignment into a positioned, rotated text box.

use angle::Deg;
use itertools::Itertools;

use crate::{
    geom::rotate_vec,
    style::{Font, HorizontalAlign, VerticalAlign},
    Rect, Size, V2,
};

/// Something which can compute the natural size of a piece of text
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &Font) -> Size;
}

/// Average glyph widths of common families, as multiples of the font size
const FAMILY_WIDTHS: &[(&str, f64)] = &[
    ("monospace", 0.6),
    ("courier", 0.6),
    ("courier new", 0.6),
    ("consolas", 0.55),
    ("sans-serif", 0.52),
    ("arial", 0.52),
    ("helvetica", 0.52),
    ("verdana", 0.58),
    ("segoe ui", 0.5),
    ("serif", 0.48),
    ("times", 0.46),
    ("times new roman", 0.46),
    ("georgia", 0.5),
];
const BOLD_WIDENING: f64 = 1.1; // multiple of the regular glyph width

/// Measures text from per-family average glyph widths.  This doesn't look at any font files, so
/// it is fast, deterministic and available everywhere, but only approximate.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// The family used when none of the requested families are known.  Must itself be known.
    fallback_family: String,
    /// Distance between consecutive baselines, as a multiple of the font size
    line_height: f64,
}

impl FontMetrics {
    /// Creates a `FontMetrics`.  If `fallback_family` isn't one of the known families,
    /// `sans-serif` is used instead.
    pub fn new(fallback_family: &str, line_height: f64) -> Self {
        let fallback_family = if width_ratio(fallback_family).is_some() {
            fallback_family.to_owned()
        } else {
            log::debug!(
                "Unknown fallback font family {:?}, using sans-serif",
                fallback_family
            );
            "sans-serif".to_owned()
        };
        Self {
            fallback_family,
            line_height,
        }
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn fallback_family(&self) -> &str {
        &self.fallback_family
    }

    /// `true` if any of the families listed in `family` (which can be a comma-separated list)
    /// have metrics
    pub fn knows_family(&self, family: &str) -> bool {
        width_ratio(family).is_some()
    }

    fn glyph_width(&self, font: &Font) -> f64 {
        let ratio = width_ratio(&font.family).unwrap_or_else(|| {
            log::debug!(
                "No metrics for font family {:?}, falling back to {:?}",
                font.family,
                self.fallback_family
            );
            width_ratio(&self.fallback_family).unwrap_or(0.52)
        });
        let widening = if font.weight.is_bold() {
            BOLD_WIDENING
        } else {
            1.0
        };
        ratio * widening * font.effective_size()
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new("sans-serif", 1.2)
    }
}

impl TextMeasurer for FontMetrics {
    fn measure(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let lines = split_lines(text);
        let longest_line = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            longest_line as f64 * self.glyph_width(font),
            lines.len() as f64 * self.line_height * font.effective_size(),
        )
    }
}

/// Splits text into lines, accepting both `\n` and `\r\n` line endings
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect_vec()
}

/// Looks up the first known family in a CSS-style comma-separated family list
fn width_ratio(family: &str) -> Option<f64> {
    family.split(',').find_map(|name| {
        let name = name.trim().trim_matches(|c| c == '"' || c == '\'').to_lowercase();
        FAMILY_WIDTHS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|&(_, ratio)| ratio)
    })
}

/// A text box of a given size, positioned relative to an anchor point and rotated about it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    anchor: V2,
    size: Size,
    /// Top-left corner of the text box relative to `anchor`, before rotation
    offset: V2,
    rotation: Deg<f64>,
}

impl TextLayout {
    pub fn new(
        anchor: V2,
        size: Size,
        halign: HorizontalAlign,
        valign: VerticalAlign,
        rotation: Deg<f64>,
    ) -> Self {
        let dx = match halign {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => -size.width / 2.0,
            HorizontalAlign::Right => -size.width,
        };
        let dy = match valign {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => -size.height / 2.0,
            VerticalAlign::Bottom => -size.height,
        };
        Self {
            anchor,
            size,
            offset: V2::new(dx, dy),
            rotation,
        }
    }

    pub fn anchor(&self) -> V2 {
        self.anchor
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rotation(&self) -> Deg<f64> {
        self.rotation
    }

    /// Top-left corner of the text box relative to the anchor, in the text's own (unrotated)
    /// frame
    pub fn offset(&self) -> V2 {
        self.offset
    }

    /// Maps a point given relative to the top-left of the unrotated text box into device space
    pub fn transform_point(&self, box_pt: V2) -> V2 {
        self.anchor + rotate_vec(self.offset + box_pt, self.rotation)
    }

    /// The corners of the text box in device space, clockwise from the top-left of the text
    pub fn corners(&self) -> [V2; 4] {
        let (w, h) = (self.size.width, self.size.height);
        [
            self.transform_point(V2::new(0.0, 0.0)),
            self.transform_point(V2::new(w, 0.0)),
            self.transform_point(V2::new(w, h)),
            self.transform_point(V2::new(0.0, h)),
        ]
    }

    /// The axis-aligned bounds of the (possibly rotated) text box
    pub fn bounds(&self) -> Rect {
        Rect::bbox(self.corners()).unwrap_or_else(|| Rect::from_min_size(self.anchor, Size::ZERO))
    }
}

/// Returns the uniform scale factor (never more than `1`) which makes `natural` fit inside
/// `max_size`.  No bound, or text which already fits, gives `1`.
pub fn fit_scale(natural: Size, max_size: Option<Size>) -> f64 {
    let max = match max_size {
        Some(m) => m,
        None => return 1.0,
    };
    let axis_scale = |natural: f64, max: f64| if natural > max { max / natural } else { 1.0 };
    axis_scale(natural.width, max.width).min(axis_scale(natural.height, max.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_text_is_zero_size() {
        let m = FontMetrics::default();
        assert_eq!(m.measure("", &Font::default()), Size::ZERO);
        assert_eq!(m.measure("", &Font::new("Arial", 40.0).bold()), Size::ZERO);
    }

    #[test]
    fn measurement_scales_with_font() {
        let m = FontMetrics::default();
        let small = m.measure("abcd", &Font::new("monospace", 10.0));
        let big = m.measure("abcd", &Font::new("monospace", 20.0));
        assert!(close(small.width, 4.0 * 0.6 * 10.0));
        assert!(close(small.height, 12.0));
        assert!(close(big.width, 2.0 * small.width));
        let bold = m.measure("abcd", &Font::new("monospace", 10.0).bold());
        assert!(bold.width > small.width);
    }

    #[test]
    fn multi_line_text_uses_widest_line() {
        let m = FontMetrics::default();
        let font = Font::new("Courier New", 10.0);
        let s = m.measure("ab\r\nabcdef\nx", &font);
        assert!(close(s.width, 6.0 * 6.0));
        assert!(close(s.height, 3.0 * 12.0));
    }

    #[test]
    fn unknown_families_fall_back() {
        let m = FontMetrics::new("serif", 1.0);
        let unknown = m.measure("hello", &Font::new("No Such Font", 10.0));
        let serif = m.measure("hello", &Font::new("serif", 10.0));
        assert_eq!(unknown, serif);
        // The first known entry of a family list wins
        let listed = m.measure("hello", &Font::new("'No Such Font', monospace", 10.0));
        assert_eq!(listed, m.measure("hello", &Font::new("monospace", 10.0)));
        assert_eq!(FontMetrics::new("Wingdings", 1.0).fallback_family(), "sans-serif");
    }

    #[test]
    fn alignment_moves_the_box() {
        let size = Size::new(40.0, 10.0);
        let anchor = V2::new(100.0, 50.0);
        let centred = TextLayout::new(
            anchor,
            size,
            HorizontalAlign::Center,
            VerticalAlign::Middle,
            Deg(0.0),
        );
        assert_eq!(centred.bounds(), Rect::new(80.0, 45.0, 40.0, 10.0));
        let bottom_right = TextLayout::new(
            anchor,
            size,
            HorizontalAlign::Right,
            VerticalAlign::Bottom,
            Deg(0.0),
        );
        assert_eq!(bottom_right.bounds(), Rect::new(60.0, 40.0, 40.0, 10.0));
    }

    #[test]
    fn rotation_is_about_the_anchor() {
        let layout = TextLayout::new(
            V2::new(10.0, 10.0),
            Size::new(20.0, 4.0),
            HorizontalAlign::Left,
            VerticalAlign::Top,
            Deg(90.0),
        );
        let [top_left, top_right, ..] = layout.corners();
        assert!(close(top_left.x, 10.0) && close(top_left.y, 10.0));
        // The top edge now runs down the screen
        assert!(close(top_right.x, 10.0) && close(top_right.y, 30.0));
    }

    #[test]
    fn fit_scale_only_shrinks() {
        let natural = Size::new(100.0, 20.0);
        assert_eq!(fit_scale(natural, None), 1.0);
        assert_eq!(fit_scale(natural, Some(Size::new(200.0, 200.0))), 1.0);
        assert!(close(fit_scale(natural, Some(Size::new(50.0, 20.0))), 0.5));
        assert!(close(fit_scale(natural, Some(Size::new(50.0, 5.0))), 0.25));
        assert_eq!(fit_scale(natural, Some(Size::ZERO)), 0.0);
    }
}
