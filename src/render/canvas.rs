//! What we are drawing on.
use std::ops;
use kurbo::{Point, Size, Vec2};
use crate::error::RenderError;


/// The font family used for all labels.
const FONT_FAMILY: &str = "sans-serif";


//------------ Canvas --------------------------------------------------------

/// The surface to draw a decoration on.
///
/// Drawing is done directly via deref-ing to a cairo context. In addition,
/// the canvas knows its size in pixels so it can create layers matching
/// it, and it offers the few drawing helpers the decoration needs.
#[derive(Debug)]
pub struct Canvas {
    /// The Cairo context for actual rendering.
    context: cairo::Context,

    /// The size of the canvas in pixels.
    size: Size,
}

impl Canvas {
    /// Creates a new canvas for a surface of the given size.
    pub fn new(
        surface: &cairo::Surface, size: Size
    ) -> Result<Self, RenderError> {
        Ok(Canvas {
            context: cairo::Context::new(surface)?,
            size,
        })
    }

    /// Returns a reference to the Cairo rendering context.
    pub fn context(&self) -> &cairo::Context {
        &self.context
    }

    /// Selects the label font at the given size.
    pub fn apply_font(&self, size: f64) {
        self.context.select_font_face(
            FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal
        );
        self.context.set_font_size(size);
    }

    /// Returns the metrics of the current font.
    pub fn font_metrics(&self) -> Result<FontMetrics, RenderError> {
        let font = self.context.font_extents()?;
        Ok(FontMetrics {
            ascent: font.ascent(),
            descent: font.descent(),
            height: font.height(),
        })
    }

    /// Returns the advance width of `text` in the current font.
    pub fn text_width(&self, text: &str) -> Result<f64, RenderError> {
        Ok(self.context.text_extents(text)?.x_advance())
    }

    /// Strokes a straight line between two points.
    ///
    /// Both points are snapped to whole pixels.
    pub fn stroke_line(
        &self, p0: Point, p1: Point
    ) -> Result<(), RenderError> {
        let p0 = p0.round();
        let p1 = p1.round();
        self.context.new_path();
        self.context.move_to(p0.x, p0.y);
        self.context.line_to(p1.x, p1.y);
        self.context.stroke()?;
        Ok(())
    }

    /// Shows `text` with its baseline starting at `point`.
    pub fn show_text_at(
        &self, point: Point, text: &str
    ) -> Result<(), RenderError> {
        self.context.move_to(point.x, point.y);
        self.context.show_text(text)?;
        Ok(())
    }

    /// Creates an empty layer of the same size as the canvas.
    pub fn create_layer(&self) -> Result<Layer, RenderError> {
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.size.width.ceil() as i32,
            self.size.height.ceil() as i32,
        )?;
        let canvas = Canvas::new(&surface, self.size)?;
        canvas.set_antialias(self.antialias());
        canvas.set_font_face(&self.font_face());
        canvas.set_font_matrix(self.font_matrix());
        Ok(Layer { surface, canvas })
    }

    /// Paints a layer onto the canvas moved by `offset`.
    ///
    /// The offset is rounded to whole pixels.
    pub fn overlay(
        &self, layer: Layer, offset: Vec2
    ) -> Result<(), RenderError> {
        let Layer { surface, canvas } = layer;
        drop(canvas);
        surface.flush();
        let offset = offset.round();
        self.context.save()?;
        self.context.set_source_surface(&*surface, offset.x, offset.y)?;
        self.context.paint()?;
        self.context.restore()?;
        Ok(())
    }
}


//--- Deref

impl ops::Deref for Canvas {
    type Target = cairo::Context;

    fn deref(&self) -> &Self::Target {
        self.context()
    }
}


//------------ Layer ---------------------------------------------------------

/// An isolated surface that is later painted onto a canvas.
///
/// Each bar is drawn into its own layer so its strokes and text don’t
/// interact with those of the other bar before compositing.
#[derive(Debug)]
pub struct Layer {
    surface: cairo::ImageSurface,
    canvas: Canvas,
}

impl Layer {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}


//------------ FontMetrics ---------------------------------------------------

/// The vertical metrics of a font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// The distance from the baseline to the top of the tallest glyph.
    pub ascent: f64,

    /// The distance from the baseline to the bottom of the lowest glyph.
    pub descent: f64,

    /// The recommended distance between two baselines.
    pub height: f64,
}

impl FontMetrics {
    /// Returns the height of the prongs at the end of a bar.
    ///
    /// This is also half the height of the space covered by two bars
    /// including their labels.
    pub fn prong_height(&self) -> f64 {
        self.height.round() + self.descent.round()
    }
}
