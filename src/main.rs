use angle::Deg;
use plotdraw::{
    Canvas, Color, Font, HorizontalAlign, LineStyle, Rect, RenderContext, SvgRenderContext,
    VerticalAlign, V2,
};

const MARGIN: f64 = 50.0;

fn main() -> plotdraw::Result<()> {
    env_logger::init();

    let canvas = Canvas::new(480.0, 320.0)?.with_paint_background(true);
    let mut svg = SvgRenderContext::new(canvas);
    draw_bar_chart(&mut svg, &[("Q1", 3.0), ("Q2", 5.5), ("Q3", 4.2), ("Q4", 6.8)]);

    let file = std::fs::File::create("chart.svg")?;
    svg.write_to(std::io::BufWriter::new(file))?;
    println!("Wrote chart.svg");
    Ok(())
}

/// Draws a bar chart through any backend
fn draw_bar_chart(rc: &mut dyn RenderContext, data: &[(&str, f64)]) {
    let plot = Rect::new(
        MARGIN,
        MARGIN / 2.0,
        rc.width() - MARGIN * 1.5,
        rc.height() - MARGIN * 1.5,
    );
    let max_value = data
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0, f64::max)
        .ceil()
        .max(1.0); // An all-zero series still gets a one-unit axis
    let y_of = |v: f64| plot.bottom() - v / max_value * plot.height;
    let label_font = Font::new("Arial", 11.0);

    // Grid lines, then the axes on top of them
    let grid = (0..=max_value as usize)
        .flat_map(|v| {
            let y = y_of(v as f64);
            [V2::new(plot.left, y), V2::new(plot.right(), y)]
        })
        .collect::<Vec<_>>();
    let grid_style = LineStyle::solid(Color::LIGHT_GRAY, 1.0)
        .dashed(vec![3.0, 2.0])
        .aliased(true);
    rc.draw_line_segments(&grid, &grid_style);
    rc.draw_line(
        &[plot.top_left(), V2::new(plot.left, plot.bottom()), plot.bottom_right()],
        &LineStyle::solid(Color::BLACK, 1.5),
    );

    // Y-axis tick labels, right-aligned against the axis
    for v in 0..=max_value as usize {
        rc.draw_text(
            V2::new(plot.left - 6.0, y_of(v as f64)),
            &v.to_string(),
            Color::BLACK,
            &label_font,
            Deg(0.0),
            HorizontalAlign::Right,
            VerticalAlign::Middle,
            None,
        );
    }

    // Bars, with a marker on top of each one
    let slot = plot.width / data.len() as f64;
    let bars = data
        .iter()
        .enumerate()
        .map(|(i, (_, v))| {
            let left = plot.left + slot * (i as f64 + 0.2);
            Rect::from_corners(V2::new(left, y_of(*v)), V2::new(left + slot * 0.6, plot.bottom()))
        })
        .collect::<Vec<_>>();
    rc.set_tool_tip("Quarterly revenue");
    rc.draw_rectangles(&bars, Color::STEEL_BLUE, Color::UNDEFINED, 0.0);
    let markers = bars
        .iter()
        .map(|bar| Rect::new(bar.centre().x - 4.0, bar.top - 4.0, 8.0, 8.0))
        .collect::<Vec<_>>();
    rc.draw_ellipses(&markers, Color::ORANGE, Color::BLACK, 1.0);
    rc.set_tool_tip("");

    // Rotated category labels under each bar, shrunk if they don't fit the slot
    for (bar, (name, _)) in bars.iter().zip(data) {
        rc.draw_text(
            V2::new(bar.centre().x, plot.bottom() + 6.0),
            name,
            Color::BLACK,
            &label_font,
            Deg(-30.0),
            HorizontalAlign::Right,
            VerticalAlign::Top,
            Some(plotdraw::Size::new(slot, MARGIN)),
        );
    }

    let title_font = Font::new("Arial", 14.0).bold();
    let title = "Revenue by quarter";
    let title_size = rc.measure_text(title, &title_font);
    rc.draw_text(
        V2::new(rc.width() / 2.0, (MARGIN / 2.0 - title_size.height) / 2.0),
        title,
        Color::BLACK,
        &title_font,
        Deg(0.0),
        HorizontalAlign::Center,
        VerticalAlign::Top,
        None,
    );
}
