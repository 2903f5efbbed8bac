//! A backend which records every primitive call instead of drawing it.  This is useful for testing
//! chart code (and for checking that batched operations reach the primitives in the right order).

use angle::Deg;

use crate::{
    context::{Canvas, RenderContext},
    style::{Font, HorizontalAlign, LineStyle, VerticalAlign},
    text::{FontMetrics, TextMeasurer},
    Color, Rect, Size, V2,
};

/// A single recorded call to a primitive (or to [`RenderContext::set_tool_tip`])
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Ellipse {
        rect: Rect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    },
    Line {
        points: Vec<V2>,
        line: LineStyle,
    },
    Polygon {
        points: Vec<V2>,
        fill: Color,
        line: LineStyle,
    },
    Rectangle {
        rect: Rect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    },
    Text {
        position: V2,
        text: String,
        fill: Color,
        font: Font,
        rotation: Deg<f64>,
        halign: HorizontalAlign,
        valign: VerticalAlign,
        max_size: Option<Size>,
    },
    ToolTip(String),
}

/// A [`RenderContext`] which keeps a log of [`DrawCommand`]s.  Calls are recorded exactly as they
/// were made (including calls which another backend would treat as no-ops), so that callers can
/// see precisely what reached the primitives.
#[derive(Debug)]
pub struct RecordingContext<M = FontMetrics> {
    canvas: Canvas,
    measurer: M,
    commands: Vec<DrawCommand>,
}

impl RecordingContext<FontMetrics> {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_measurer(canvas, FontMetrics::default())
    }
}

impl<M: TextMeasurer> RecordingContext<M> {
    pub fn with_measurer(canvas: Canvas, measurer: M) -> Self {
        Self {
            canvas,
            measurer,
            commands: Vec::new(),
        }
    }

    /// Every command recorded so far, in call order
    pub fn commands(&self) -> &[DrawCommand] {
        self.commands.as_slice()
    }

    /// Removes and returns every recorded command
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear()
    }

    /// Changes the size of the recorded surface
    pub fn resize(&mut self, width: f64, height: f64) -> crate::Result<()> {
        self.canvas.resize(width, height)
    }

    fn record(&mut self, cmd: DrawCommand) {
        log::trace!("Recording {:?}", cmd);
        self.commands.push(cmd);
    }
}

impl<M: TextMeasurer> RenderContext for RecordingContext<M> {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64) {
        self.record(DrawCommand::Ellipse {
            rect,
            fill,
            stroke,
            thickness,
        });
    }

    fn draw_line(&mut self, points: &[V2], line: &LineStyle) {
        self.record(DrawCommand::Line {
            points: points.to_vec(),
            line: line.clone(),
        });
    }

    fn draw_polygon(&mut self, points: &[V2], fill: Color, line: &LineStyle) {
        self.record(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            line: line.clone(),
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Color, stroke: Color, thickness: f64) {
        self.record(DrawCommand::Rectangle {
            rect,
            fill,
            stroke,
            thickness,
        });
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
        self.record(DrawCommand::Text {
            position,
            text: text.to_owned(),
            fill,
            font: font.clone(),
            rotation,
            halign,
            valign,
            max_size,
        });
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        self.measurer.measure(text, font)
    }

    fn set_tool_tip(&mut self, text: &str) {
        self.record(DrawCommand::ToolTip(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RecordingContext {
        RecordingContext::new(Canvas::new(100.0, 100.0).unwrap())
    }

    #[test]
    fn records_in_call_order() {
        let mut c = ctx();
        c.draw_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED, Color::UNDEFINED, 0.0);
        c.set_tool_tip("hi");
        c.draw_line(&[V2::new(0.0, 0.0)], &LineStyle::default());
        let cmds = c.take_commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[0], DrawCommand::Rectangle { fill, .. } if fill == Color::RED));
        assert_eq!(cmds[1], DrawCommand::ToolTip("hi".to_owned()));
        assert!(matches!(&cmds[2], DrawCommand::Line { points, .. } if points.len() == 1));
        assert!(c.commands().is_empty());
    }

    #[test]
    fn measurement_ignores_paint() {
        let c = ctx();
        let font = Font::new("Arial", 12.0);
        assert_eq!(c.measure_text("", &font), Size::ZERO);
        let size = c.measure_text("Revenue", &font);
        assert!(!size.is_zero_area());
        assert_eq!(c.measure_text("Revenue", &font), size);
    }

    #[test]
    fn resize_changes_reported_size() {
        let mut c = ctx();
        c.resize(640.0, 480.0).unwrap();
        assert_eq!((c.width(), c.height()), (640.0, 480.0));
        assert!(c.resize(f64::NAN, 1.0).is_err());
    }
}
