//! A [`RenderContext`] which writes an SVG document

use std::io::Write;

use angle::Deg;
use itertools::Itertools;
use simple_xml_builder::XMLElement;

use crate::{
    context::{Canvas, RenderContext},
    style::{
        Font, FontWeight, HorizontalAlign, LineJoin, LinePaint, LineStyle, Paint, StrokeStyle,
        VerticalAlign,
    },
    text::{fit_scale, split_lines, FontMetrics, TextLayout, TextMeasurer},
    Color, Rect, Result, Size, V2,
};

/// Configuration for how an [`SvgRenderContext`] writes its document
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Colour of the background rectangle, painted only if the [`Canvas`] asks for it
    pub background: Color,
    /// The family which text falls back to if the requested family isn't available.  This is
    /// also appended to every `font-family` attribute, so viewers fall back the same way.
    pub fallback_font_family: String,
    /// Distance between consecutive baselines, as a multiple of the font size
    pub line_height: f64,
    /// Distance from the top of a line of text to its baseline, as a multiple of the font size.
    /// SVG positions text by its baseline, so this is needed to honour vertical alignment.
    pub baseline_offset: f64,
    /// Number of decimal places written for coordinates
    pub precision: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            fallback_font_family: "sans-serif".to_owned(),
            line_height: 1.2,     // multiples of font size
            baseline_offset: 0.9, // multiples of font size
            precision: 3,
        }
    }
}

/// Renders into an in-memory SVG document.  Call [`finish`](Self::finish) or
/// [`write_to`](Self::write_to) to get the document out.
pub struct SvgRenderContext {
    canvas: Canvas,
    opts: SvgOptions,
    metrics: FontMetrics,
    /// Top-level elements, in paint order
    elements: Vec<XMLElement>,
    tool_tip: Option<String>,
}

impl SvgRenderContext {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_options(canvas, SvgOptions::default())
    }

    pub fn with_options(canvas: Canvas, opts: SvgOptions) -> Self {
        let metrics = FontMetrics::new(&opts.fallback_font_family, opts.line_height);
        Self {
            canvas,
            opts,
            metrics,
            elements: Vec::new(),
            tool_tip: None,
        }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.opts
    }

    /// Changes the size of the document
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.canvas.resize(width, height)
    }

    /// Number of top-level elements drawn so far (not counting the background)
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Builds the finished `<svg>` element
    pub fn into_element(self) -> XMLElement {
        let mut root = XMLElement::new("svg");
        root.add_attribute("xmlns", "http://www.w3.org/2000/svg");
        root.add_attribute("width", &self.num(self.canvas.width()));
        root.add_attribute("height", &self.num(self.canvas.height()));
        root.add_attribute(
            "viewBox",
            &format!(
                "0 0 {} {}",
                self.num(self.canvas.width()),
                self.num(self.canvas.height())
            ),
        );
        if self.canvas.paint_background() && self.opts.background.is_visible() {
            let mut bg = self.rect_elem(self.canvas.bounds());
            add_fill_attrs(Some(&self.opts.background), self.opts.precision, &mut bg);
            root.add_child(bg);
        }
        log::debug!(
            "Finishing {}x{} SVG with {} elements",
            self.canvas.width(),
            self.canvas.height(),
            self.elements.len()
        );
        for elem in self.elements {
            root.add_child(elem);
        }
        root
    }

    /// Returns the finished document as a string
    pub fn finish(self) -> String {
        self.into_element().to_string()
    }

    /// Writes the finished document to `writer`
    pub fn write_to(self, mut writer: impl Write) -> Result<()> {
        write!(writer, "{}", self.into_element())?;
        writer.flush()?;
        Ok(())
    }

    /// Adds a top-level element, attaching the current tooltip (if any)
    fn push(&mut self, elem: XMLElement) {
        let elem = match &self.tool_tip {
            Some(tip) => {
                let mut title = XMLElement::new("title");
                title.add_text(tip);
                let mut group = XMLElement::new("g");
                group.add_child(title);
                group.add_child(elem);
                group
            }
            None => elem,
        };
        self.elements.push(elem);
    }

    /// Formats a number with at most `precision` decimal places, and no trailing zeros
    fn num(&self, v: f64) -> String {
        fmt_num(v, self.opts.precision)
    }

    /// `x,y x,y ...` as used by `<polyline>` and `<polygon>`
    fn points_str(&self, points: &[V2]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", self.num(p.x), self.num(p.y)))
            .join(" ")
    }

    fn rect_elem(&self, rect: Rect) -> XMLElement {
        let mut elem = XMLElement::new("rect");
        elem.add_attribute("x", &self.num(rect.left));
        elem.add_attribute("y", &self.num(rect.top));
        elem.add_attribute("width", &self.num(rect.width));
        elem.add_attribute("height", &self.num(rect.height));
        elem
    }

    fn add_stroke_attrs(&self, style: Option<&StrokeStyle>, xml_elem: &mut XMLElement) {
        match style {
            Some(s) => {
                xml_elem.add_attribute("stroke", &hex_rgb(s.color));
                if s.color.a() != 255 {
                    xml_elem.add_attribute("stroke-opacity", &self.num(s.color.opacity()));
                }
                xml_elem.add_attribute("stroke-width", &self.num(s.thickness));
            }
            None => xml_elem.add_attribute("stroke", "none"), // Put `stroke="none"` if no stroke
        }
    }

    /// Adds the attributes which only polylines and polygons have: joins, dashes and aliasing
    fn add_line_attrs(&self, stroke: &StrokeStyle, line: &LineStyle, xml_elem: &mut XMLElement) {
        let join = match line.line_join {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        };
        xml_elem.add_attribute("stroke-linejoin", join);
        if let Some(pattern) = line.effective_dash_pattern() {
            // Dash lengths are given in multiples of the stroke thickness
            let dashes = pattern
                .iter()
                .map(|len| self.num(len.max(0.0) * stroke.thickness))
                .join(",");
            xml_elem.add_attribute("stroke-dasharray", &dashes);
        }
        if line.aliased {
            xml_elem.add_attribute("shape-rendering", "crispEdges");
        }
    }
}

impl RenderContext for SvgRenderContext {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64) {
        let rect = rect.normalised(); // SVG rejects negative radii
        let paint = match Paint::resolve(fill, stroke, thickness) {
            Some(p) => p,
            None => return, // Nothing visible to draw
        };
        log::trace!("SVG ellipse in {:?}", rect);
        let centre = rect.centre();
        let mut elem = XMLElement::new("ellipse");
        elem.add_attribute("cx", &self.num(centre.x));
        elem.add_attribute("cy", &self.num(centre.y));
        elem.add_attribute("rx", &self.num(rect.width / 2.0));
        elem.add_attribute("ry", &self.num(rect.height / 2.0));
        add_fill_attrs(paint.fill_style(), self.opts.precision, &mut elem);
        self.add_stroke_attrs(paint.stroke_style(), &mut elem);
        self.push(elem);
    }

    fn draw_line(&mut self, points: &[V2], line: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        let stroke = match line.stroke() {
            Some(s) => s,
            None => return,
        };
        log::trace!("SVG polyline with {} points", points.len());
        let mut elem = XMLElement::new("polyline");
        elem.add_attribute("points", &self.points_str(points));
        add_fill_attrs(None, self.opts.precision, &mut elem);
        self.add_stroke_attrs(Some(&stroke), &mut elem);
        self.add_line_attrs(&stroke, line, &mut elem);
        self.push(elem);
    }

    fn draw_polygon(&mut self, points: &[V2], fill: Color, line: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        let paint = match LinePaint::resolve_line(fill, line) {
            Some(p) => p,
            None => return,
        };
        log::trace!("SVG polygon with {} points", points.len());
        let mut elem = XMLElement::new("polygon");
        elem.add_attribute("points", &self.points_str(points));
        add_fill_attrs(paint.fill_style(), self.opts.precision, &mut elem);
        let stroke = paint.stroke_style();
        self.add_stroke_attrs(stroke.map(|(s, _)| s), &mut elem);
        if let Some((stroke, line)) = stroke {
            self.add_line_attrs(stroke, line, &mut elem);
        }
        self.push(elem);
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64) {
        let rect = rect.normalised(); // SVG rejects negative widths and heights
        let paint = match Paint::resolve(fill, stroke, thickness) {
            Some(p) => p,
            None => return,
        };
        log::trace!("SVG rect {:?}", rect);
        let mut elem = self.rect_elem(rect);
        add_fill_attrs(paint.fill_style(), self.opts.precision, &mut elem);
        self.add_stroke_attrs(paint.stroke_style(), &mut elem);
        self.push(elem);
    }

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
    ) {
        if text.is_empty() || !fill.is_visible() {
            return;
        }
        let natural = self.measure_text(text, font);
        let scale = fit_scale(natural, max_size);
        if scale < 1.0 {
            log::debug!(
                "Scaling {:?} by {} to fit inside {:?}",
                text,
                scale,
                max_size
            );
        }
        let font_size = font.effective_size() * scale;
        if font_size.is_nan() || font_size <= 0.0 {
            return; // Text scaled (or sized) down to nothing
        }
        let layout = TextLayout::new(position, natural.scale(scale), halign, valign, rotation);

        // SVG text is positioned in a frame which is translated to the anchor then rotated, so
        // the lines are laid out relative to the top-left of the text box in that frame
        let mut transform_str = format!(
            "translate({},{})",
            self.num(position.x),
            self.num(position.y)
        );
        if rotation.0 != 0.0 {
            transform_str.push_str(&format!(" rotate({})", self.num(rotation.0)));
        }
        let (line_x, anchor_str) = match halign {
            HorizontalAlign::Left => (layout.offset().x, "start"),
            HorizontalAlign::Center => (layout.offset().x + layout.size().width / 2.0, "middle"),
            HorizontalAlign::Right => (layout.offset().x + layout.size().width, "end"),
        };
        let baseline_y = |line_idx: usize| {
            layout.offset().y
                + (line_idx as f64 * self.opts.line_height + self.opts.baseline_offset) * font_size
        };

        let mut elem = XMLElement::new("text");
        elem.add_attribute("transform", &transform_str);
        elem.add_attribute(
            "font-family",
            &format!("{}, {}", font.family, self.metrics.fallback_family()),
        );
        elem.add_attribute("font-size", &self.num(font_size));
        if font.weight != FontWeight::NORMAL {
            elem.add_attribute("font-weight", &self.num(font.weight.0));
        }
        elem.add_attribute("text-anchor", anchor_str);
        // Whitespace counts towards the measured size, so it mustn't be collapsed
        elem.add_attribute("xml:space", "preserve");
        add_fill_attrs(Some(&fill), self.opts.precision, &mut elem);

        let lines = split_lines(text);
        if let [line] = lines.as_slice() {
            elem.add_attribute("x", &self.num(line_x));
            elem.add_attribute("y", &self.num(baseline_y(0)));
            elem.add_text(line);
        } else {
            for (idx, line) in lines.iter().enumerate() {
                let mut tspan = XMLElement::new("tspan");
                tspan.add_attribute("x", &self.num(line_x));
                tspan.add_attribute("y", &self.num(baseline_y(idx)));
                tspan.add_text(line);
                elem.add_child(tspan);
            }
        }
        log::trace!("SVG text {:?} at {:?}", text, position);
        self.push(elem);
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        self.metrics.measure(text, font)
    }

    /// Draws all the segments as one `<path>`.  Each segment is its own subpath, so dashes
    /// restart on every segment just as they would with separate lines.
    fn draw_line_segments(&mut self, points: &[V2], line: &LineStyle) {
        let stroke = match line.stroke() {
            Some(s) => s,
            None => return,
        };
        let path_str = points
            .iter()
            .tuples()
            .map(|(p1, p2)| {
                format!(
                    "M{},{} L{},{}",
                    self.num(p1.x),
                    self.num(p1.y),
                    self.num(p2.x),
                    self.num(p2.y)
                )
            })
            .join(" ");
        if path_str.is_empty() {
            return; // Fewer than two points
        }
        log::trace!("SVG path with {} segments", points.len() / 2);
        let mut elem = XMLElement::new("path");
        elem.add_attribute("d", &path_str);
        add_fill_attrs(None, self.opts.precision, &mut elem);
        self.add_stroke_attrs(Some(&stroke), &mut elem);
        self.add_line_attrs(&stroke, line, &mut elem);
        self.push(elem);
    }

    fn set_tool_tip(&mut self, text: &str) {
        self.tool_tip = if text.is_empty() {
            None
        } else {
            Some(text.to_owned())
        };
    }
}

/// Add SVG attributes to give an [`XMLElement`] a given fill colour
fn add_fill_attrs(fill: Option<&Color>, precision: usize, xml_elem: &mut XMLElement) {
    match fill {
        Some(c) => {
            xml_elem.add_attribute("fill", &hex_rgb(*c));
            if c.a() != 255 {
                xml_elem.add_attribute("fill-opacity", &fmt_num(c.opacity(), precision));
            }
        }
        None => xml_elem.add_attribute("fill", "none"), // We need `fill="none"` to disable the fill
    }
}

/// `#rrggbb`, ignoring alpha (SVG 1.1 has no 8-digit hex colours)
fn hex_rgb(c: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

fn fmt_num(v: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, v);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    match s {
        "-0" => "0".to_owned(),
        _ => s.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(1.5, 3), "1.5");
        assert_eq!(fmt_num(2.0, 3), "2");
        assert_eq!(fmt_num(100.0, 0), "100");
        assert_eq!(fmt_num(-0.0001, 3), "0");
        assert_eq!(fmt_num(1.23456, 2), "1.23");
    }

    #[test]
    fn colours_drop_alpha() {
        assert_eq!(hex_rgb(Color::rgba(255, 0, 16, 3)), "#ff0010");
    }

    #[test]
    fn invisible_shapes_emit_nothing() {
        let mut svg = SvgRenderContext::new(Canvas::new(10.0, 10.0).unwrap());
        let r = Rect::new(1.0, 1.0, 2.0, 2.0);
        svg.draw_rectangle(r, Color::UNDEFINED, Color::BLACK, 0.0);
        svg.draw_ellipse(r, Color::UNDEFINED, Color::UNDEFINED, 3.0);
        svg.draw_line(&[V2::new(0.0, 0.0), V2::new(1.0, 1.0)], &LineStyle::none());
        svg.draw_line(&[V2::new(0.0, 0.0)], &LineStyle::default());
        svg.draw_polygon(&[], Color::RED, &LineStyle::default());
        svg.draw_line_segments(&[V2::new(0.0, 0.0)], &LineStyle::default());
        svg.draw_text(
            V2::new(1.0, 1.0),
            "hidden",
            Color::UNDEFINED,
            &Font::default(),
            Deg(0.0),
            HorizontalAlign::Left,
            VerticalAlign::Top,
            None,
        );
        svg.draw_text(
            V2::new(1.0, 1.0),
            "",
            Color::BLACK,
            &Font::default(),
            Deg(0.0),
            HorizontalAlign::Left,
            VerticalAlign::Top,
            None,
        );
        assert_eq!(svg.num_elements(), 0);
    }

    #[test]
    fn empty_tool_tip_clears() {
        let mut svg = SvgRenderContext::new(Canvas::new(10.0, 10.0).unwrap());
        svg.set_tool_tip("tip");
        assert_eq!(svg.tool_tip.as_deref(), Some("tip"));
        svg.set_tool_tip("");
        assert_eq!(svg.tool_tip, None);
    }
}
