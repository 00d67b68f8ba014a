//! The scale line decoration.
//!
//! This ties everything together: it computes the bars for the current map
//! scale, arranges them in the paint area, draws the background frame, and
//! then composites each bar, drawn into a layer of its own, onto the canvas.

use kurbo::{Rect, Size, Vec2};
use log::debug;
use crate::config::ScaleBarConfig;
use crate::error::RenderError;
use crate::layout::{bar_left, Layout};
use crate::render::bar::{render_bar, BarPosition};
use crate::render::canvas::Canvas;
use crate::solver::{solve, BarSpec, Solution};


//------------ MapContext ----------------------------------------------------

/// The map a decoration is drawn onto.
pub trait MapContext {
    /// Returns the denominator of the map’s current scale.
    ///
    /// For a map at 1:50,000 this is 50,000. Values of one or less are
    /// treated as the ratio itself.
    fn scale_denominator(&self) -> f64;
}

impl MapContext for f64 {
    fn scale_denominator(&self) -> f64 {
        *self
    }
}


//------------ ScaleLineDecoration -------------------------------------------

/// A decoration showing the map scale as one or two bars.
#[derive(Clone, Debug, Default)]
pub struct ScaleLineDecoration {
    config: ScaleBarConfig,
}

impl ScaleLineDecoration {
    pub fn new(config: ScaleBarConfig) -> Self {
        ScaleLineDecoration { config }
    }

    pub fn config(&self) -> &ScaleBarConfig {
        &self.config
    }

    /// Returns the size the decoration would like to have.
    ///
    /// This is the width budget wide and high enough for two bars with
    /// their labels.
    pub fn find_optimal_size(
        &self, canvas: &Canvas
    ) -> Result<Size, RenderError> {
        canvas.save()?;
        canvas.apply_font(self.config.font_size());
        let metrics = canvas.font_metrics();
        canvas.restore()?;
        Ok(Size::new(
            f64::from(self.config.width_budget()),
            8. + 2. * metrics?.prong_height(),
        ))
    }

    /// Paints the decoration into `area` of the canvas.
    ///
    /// The canvas’s state is restored afterwards. Bars that cannot be
    /// computed for the map’s scale are left out. Returns the bars that
    /// were drawn.
    pub fn paint(
        &self, canvas: &Canvas, area: Rect, map: &impl MapContext,
    ) -> Result<Solution, RenderError> {
        canvas.save()?;
        let res = self.paint_bars(canvas, area, map);
        canvas.restore()?;
        res
    }

    fn paint_bars(
        &self, canvas: &Canvas, area: Rect, map: &impl MapContext,
    ) -> Result<Solution, RenderError> {
        canvas.apply_font(self.config.font_size());
        let solution = solve(
            &self.config, map.scale_denominator(), area.width()
        );
        let metrics = canvas.font_metrics()?;
        let layout = Layout::new(
            &solution, area, self.config.alignment(),
            metrics.prong_height(), self.config.transparent(),
        );
        debug!("scale line layout: {:?}", layout);

        if let Some(frame) = layout.frame {
            self.paint_frame(canvas, frame)?;
        }

        let (top, bottom) = if solution.is_single() {
            (BarPosition::Only, BarPosition::Only)
        }
        else {
            (BarPosition::Top, BarPosition::Bottom)
        };
        self.paint_bar(
            canvas, area, &layout, solution.top.as_ref(), top,
            layout.top_offset_x,
        )?;
        self.paint_bar(
            canvas, area, &layout, solution.bottom.as_ref(), bottom,
            layout.bottom_offset_x,
        )?;
        Ok(solution)
    }

    fn paint_frame(
        &self, canvas: &Canvas, frame: Rect
    ) -> Result<(), RenderError> {
        canvas.save()?;
        canvas.set_antialias(cairo::Antialias::None);

        self.config.bg_color().apply(canvas);
        canvas.rectangle(frame.x0, frame.y0, frame.width(), frame.height());
        canvas.fill()?;

        // The border covers the outermost pixels of the fill.
        self.config.fg_color().apply(canvas);
        canvas.set_line_width(1.);
        canvas.rectangle(
            frame.x0 + 0.5, frame.y0 + 0.5,
            frame.width() - 1., frame.height() - 1.
        );
        canvas.stroke()?;
        canvas.restore()?;
        Ok(())
    }

    fn paint_bar(
        &self,
        canvas: &Canvas,
        area: Rect,
        layout: &Layout,
        spec: Option<&BarSpec>,
        position: BarPosition,
        offset_x: f64,
    ) -> Result<(), RenderError> {
        let spec = match spec {
            Some(spec) => spec,
            None => return Ok(())
        };
        let layer = render_bar(
            canvas, spec, position,
            bar_left(area, spec.pixel_span), layout.center_y,
            &self.config
        )?;
        canvas.overlay(layer, Vec2::new(offset_x, 0.))
    }
}
