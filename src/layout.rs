//! Arranging the bars within the paint area.
//!
//! Every bar is first centered horizontally in the paint area. If there are
//! two bars of different length, the shorter one is then moved according to
//! the alignment. Both bars share the vertical center of the paint area as
//! the position of their horizontal line.

use kurbo::Rect;
use crate::config::Alignment;
use crate::solver::Solution;


/// The space between the bars and the left and right edge of the frame.
pub const FRAME_PADDING_X: f64 = 24.;

/// The space between the prongs and the top and bottom edge of the frame.
pub const FRAME_PADDING_Y: f64 = 8.;


//------------ Layout --------------------------------------------------------

/// The shared geometry of the bars of a scale line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// The background frame if there is one.
    pub frame: Option<Rect>,

    /// How far the top bar is moved right from its centered position.
    pub top_offset_x: f64,

    /// How far the bottom bar is moved right from its centered position.
    pub bottom_offset_x: f64,

    /// The y coordinate of the horizontal lines of both bars.
    pub center_y: f64,
}

impl Layout {
    /// Arranges the bars of `solution` within `panel`.
    ///
    /// The frame, if not `transparent`, is sized so that it has room for
    /// two rows of labels of `prong_height` above and below the center.
    pub fn new(
        solution: &Solution,
        panel: Rect,
        alignment: Alignment,
        prong_height: f64,
        transparent: bool,
    ) -> Self {
        let center_y = panel.center().y.floor();
        let (top_offset_x, bottom_offset_x) = match (
            &solution.top, &solution.bottom
        ) {
            (Some(top), Some(bottom)) => alignment_offsets(
                alignment, top.pixel_span, bottom.pixel_span
            ),
            _ => (0., 0.)
        };

        let frame = if transparent || solution.is_empty() {
            None
        }
        else {
            let width = solution.max_span().round();
            let left_x = bar_left(panel, width).round();
            let x0 = left_x - FRAME_PADDING_X;
            let y0 = center_y - prong_height - FRAME_PADDING_Y;
            Some(Rect::new(
                x0, y0,
                x0 + width + 2. * FRAME_PADDING_X,
                y0 + 2. * prong_height + 2. * FRAME_PADDING_Y,
            ))
        };

        Layout { frame, top_offset_x, bottom_offset_x, center_y }
    }
}


//------------ Functions -----------------------------------------------------

/// Returns the left edge of a bar centered in the panel.
pub fn bar_left(panel: Rect, span: f64) -> f64 {
    panel.x0 + (panel.width() - span) / 2.
}

/// Returns the offsets of the top and bottom bar for the alignment.
///
/// Only the shorter bar is moved.
pub fn alignment_offsets(
    alignment: Alignment, top_span: f64, bottom_span: f64,
) -> (f64, f64) {
    let shift = (top_span - bottom_span).abs() / 2.;
    let shift = match alignment {
        Alignment::Left => -shift,
        Alignment::Center => return (0., 0.),
        Alignment::Right => shift,
    };
    if top_span < bottom_span {
        (shift, 0.)
    }
    else if bottom_span < top_span {
        (0., shift)
    }
    else {
        (0., 0.)
    }
}


//============ Tests =========================================================
