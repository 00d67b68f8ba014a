//! Drawing a single bar.
//!
//! A bar consists of a horizontal line with a prong at either end and,
//! optionally, one in the middle. Below or above the prongs are the numbers
//! of the distances they mark. A bar that is alone also gets the name of
//! its unit above it and leaves the unit off the numbers.

use kurbo::Point;
use crate::config::ScaleBarConfig;
use crate::error::RenderError;
use crate::length::HalfLength;
use crate::solver::BarSpec;
use super::canvas::{Canvas, FontMetrics, Layer};


//------------ BarPosition ---------------------------------------------------

/// Where a bar sits relative to the shared horizontal line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BarPosition {
    /// The upper of two bars. Prongs and labels go up.
    Top,

    /// The lower of two bars. Prongs and labels go down.
    Bottom,

    /// The only bar. Prongs straddle the line, labels go down.
    Only,
}


//------------ BarPlan -------------------------------------------------------

/// Everything to be drawn for a bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarPlan {
    /// The lines to stroke: prongs first, the horizontal line last.
    pub lines: Vec<(Point, Point)>,

    /// The labels to show.
    pub labels: Vec<Label>,
}

impl BarPlan {
    pub fn new(
        spec: &BarSpec,
        position: BarPosition,
        left_x: f64,
        center_y: f64,
        metrics: FontMetrics,
        center_tick: bool,
    ) -> Self {
        let prong = metrics.prong_height();
        let short = (prong / 4.).floor();
        let right_x = left_x + spec.pixel_span;
        let center_x = (left_x + right_x) / 2.;

        let (start_y, end_y) = match position {
            BarPosition::Only => (center_y - short, center_y + short),
            BarPosition::Top => (center_y, center_y - 2. * short),
            BarPosition::Bottom => (center_y, center_y + 2. * short),
        };
        let mut lines = vec![
            (Point::new(left_x, start_y), Point::new(left_x, end_y)),
            (Point::new(right_x, start_y), Point::new(right_x, end_y)),
        ];
        if center_tick {
            lines.push(
                (Point::new(center_x, start_y), Point::new(center_x, end_y))
            );
        }
        lines.push(
            (Point::new(left_x, center_y), Point::new(right_x, center_y))
        );

        let mut labels = Vec::new();
        let (numbers_y, suffix) = match position {
            BarPosition::Only => {
                labels.push(Label::new(
                    spec.unit.long_name(),
                    Point::new(
                        center_x, center_y - prong + metrics.ascent + 2.
                    )
                ));
                (center_y + prong + metrics.descent + 1., "")
            }
            BarPosition::Bottom => (
                center_y + prong + metrics.descent + 1.,
                spec.unit.short_name(),
            ),
            BarPosition::Top => (
                center_y - (prong - metrics.descent - 2.),
                spec.unit.short_name(),
            ),
        };
        labels.push(Label::new(
            format!("0{}", suffix), Point::new(left_x, numbers_y)
        ));
        if center_tick {
            labels.push(Label::new(
                format!("{}{}", HalfLength(spec.rounded_length), suffix),
                Point::new(center_x, numbers_y)
            ));
        }
        labels.push(Label::new(
            format!("{}{}", spec.rounded_length, suffix),
            Point::new(right_x, numbers_y)
        ));

        BarPlan { lines, labels }
    }

    /// Draws the plan onto a canvas.
    ///
    /// Lines are drawn without antialiasing. The canvas’s antialiasing is
    /// restored for the labels.
    pub fn draw(
        &self, canvas: &Canvas, config: &ScaleBarConfig
    ) -> Result<(), RenderError> {
        let antialias = canvas.antialias();
        config.fg_color().apply(canvas);
        canvas.set_line_width(config.stroke_width());
        canvas.set_antialias(cairo::Antialias::None);
        for &(p0, p1) in &self.lines {
            canvas.stroke_line(p0, p1)?;
        }
        canvas.set_antialias(antialias);
        for label in &self.labels {
            label.draw(canvas)?;
        }
        Ok(())
    }
}


//------------ Label ---------------------------------------------------------

/// A line of text horizontally centered on a point.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,

    /// The point on the baseline the text is centered on.
    pub anchor: Point,
}

impl Label {
    fn new(text: impl Into<String>, anchor: Point) -> Self {
        Label { text: text.into(), anchor }
    }

    fn draw(&self, canvas: &Canvas) -> Result<(), RenderError> {
        let width = canvas.text_width(&self.text)?;
        canvas.show_text_at(
            Point::new(self.anchor.x - width / 2., self.anchor.y),
            &self.text
        )
    }
}


//------------ render_bar ----------------------------------------------------

/// Draws a bar into a new layer of the canvas.
pub fn render_bar(
    canvas: &Canvas,
    spec: &BarSpec,
    position: BarPosition,
    left_x: f64,
    center_y: f64,
    config: &ScaleBarConfig,
) -> Result<Layer, RenderError> {
    let layer = canvas.create_layer()?;
    let metrics = layer.canvas().font_metrics()?;
    BarPlan::new(
        spec, position, left_x, center_y, metrics, config.has_center_tick()
    ).draw(layer.canvas(), config)?;
    Ok(layer)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::units::UnitDef;

    fn spec() -> BarSpec {
        BarSpec {
            unit: UnitDef::new("KILOMETER", "km", 39370.1, 0.),
            rounded_length: 5,
            pixel_span: 80.,
        }
    }

    fn metrics() -> FontMetrics {
        // prong height 16, short prong 4
        FontMetrics { ascent: 10., descent: 3., height: 13. }
    }

    fn texts(plan: &BarPlan) -> Vec<&str> {
        plan.labels.iter().map(|label| label.text.as_str()).collect()
    }

    #[test]
    fn lone_bar() {
        let plan = BarPlan::new(
            &spec(), BarPosition::Only, 10., 50., metrics(), false
        );
        assert_eq!(plan.lines, vec![
            (Point::new(10., 46.), Point::new(10., 54.)),
            (Point::new(90., 46.), Point::new(90., 54.)),
            (Point::new(10., 50.), Point::new(90., 50.)),
        ]);
        assert_eq!(texts(&plan), ["KILOMETER", "0", "5"]);
        assert_eq!(plan.labels[0].anchor, Point::new(50., 46.));
        assert_eq!(plan.labels[1].anchor, Point::new(10., 70.));
        assert_eq!(plan.labels[2].anchor, Point::new(90., 70.));
    }

    #[test]
    fn top_bar() {
        let plan = BarPlan::new(
            &spec(), BarPosition::Top, 10., 50., metrics(), false
        );
        assert_eq!(plan.lines[0], (Point::new(10., 50.), Point::new(10., 42.)));
        assert_eq!(texts(&plan), ["0km", "5km"]);
        assert_eq!(plan.labels[0].anchor, Point::new(10., 39.));
    }

    #[test]
    fn bottom_bar() {
        let plan = BarPlan::new(
            &spec(), BarPosition::Bottom, 10., 50., metrics(), false
        );
        assert_eq!(plan.lines[1], (Point::new(90., 50.), Point::new(90., 58.)));
        assert_eq!(texts(&plan), ["0km", "5km"]);
        assert_eq!(plan.labels[1].anchor, Point::new(90., 70.));
    }

    #[test]
    fn center_tick() {
        let plan = BarPlan::new(
            &spec(), BarPosition::Bottom, 10., 50., metrics(), true
        );
        assert_eq!(plan.lines.len(), 4);
        assert_eq!(plan.lines[2], (Point::new(50., 50.), Point::new(50., 58.)));
        assert_eq!(texts(&plan), ["0km", "2.5km", "5km"]);
        assert_eq!(plan.labels[1].anchor, Point::new(50., 70.));

        let plan = BarPlan::new(
            &spec(), BarPosition::Only, 10., 50., metrics(), true
        );
        assert_eq!(texts(&plan), ["KILOMETER", "0", "2.5", "5"]);
    }
}
