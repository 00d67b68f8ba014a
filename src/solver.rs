//! Computing the bars of a scale line.
//!
//! For each configured unit system, the solver determines the unit to
//! label the bar in, the rounded number shown at its right end, and how
//! many pixels that number covers at the current map scale.

use log::warn;
use crate::config::ScaleBarConfig;
use crate::error::{BarError, DomainError};
use crate::length::round_bar_length;
use crate::units::{INCHES_PER_METER, UnitDef, UnitSystem};


/// Pixels of the width budget reserved for the end caps.
pub const END_CAP_MARGIN: i64 = 6;


//------------ BarSpec -------------------------------------------------------

/// The resolved geometry of a single bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSpec {
    /// The unit the bar is labelled in.
    pub unit: UnitDef,

    /// The number shown at the right end of the bar.
    pub rounded_length: u64,

    /// The length of the bar in pixels.
    pub pixel_span: f64,
}


//------------ Solution ------------------------------------------------------

/// The bars of one scale line.
///
/// A side is `None` if it isn’t configured or couldn’t be computed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    pub top: Option<BarSpec>,
    pub bottom: Option<BarSpec>,
}

impl Solution {
    /// Returns the span of the longer bar or zero if there are none.
    pub fn max_span(&self) -> f64 {
        span(&self.top).max(span(&self.bottom))
    }

    /// Returns whether exactly one bar is present.
    pub fn is_single(&self) -> bool {
        self.top.is_some() != self.bottom.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none()
    }
}

fn span(spec: &Option<BarSpec>) -> f64 {
    spec.as_ref().map(|spec| spec.pixel_span).unwrap_or(0.)
}


//------------ Functions -----------------------------------------------------

/// Computes both bars of a scale line.
///
/// Bars that fail to compute are logged and left out.
pub fn solve(
    config: &ScaleBarConfig, scale_denominator: f64, panel_width: f64,
) -> Solution {
    let side = |name: &str, system: Option<&UnitSystem>| {
        let system = system?;
        match solve_bar(
            system, scale_denominator, config.dpi(),
            config.width_budget(), panel_width,
        ) {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!("Skipping {} scale bar: {}", name, err);
                None
            }
        }
    };
    Solution {
        top: side("top", config.top_unit()),
        bottom: side("bottom", config.bottom_unit()),
    }
}

/// Computes a single bar.
pub fn solve_bar(
    system: &UnitSystem,
    scale_denominator: f64,
    dpi: f64,
    width_budget: u32,
    panel_width: f64,
) -> Result<BarSpec, BarError> {
    let resolution = resolution(scale_denominator, dpi)?;
    let budget = pixel_budget(width_budget, panel_width)?;

    // The length covered by the pixel budget in real-world inches.
    let candidate = budget as f64 * INCHES_PER_METER * resolution;
    let unit = system.select_unit(candidate)?;

    let rounded_length = round_bar_length(
        candidate / unit.inches_per_unit()
    )?;
    if rounded_length == 0 {
        return Err(DomainError::EmptyBar.into())
    }

    Ok(BarSpec {
        unit: unit.clone(),
        rounded_length,
        pixel_span: pixel_span(rounded_length, unit, resolution),
    })
}

/// Returns the number of meters a pixel covers at the given scale.
///
/// A scale denominator greater than one is a “1:n” scale, anything else is
/// taken as an already normalized ratio.
pub fn resolution(scale_denominator: f64, dpi: f64) -> Result<f64, DomainError> {
    if !scale_denominator.is_finite() || scale_denominator <= 0. {
        return Err(DomainError::InvalidScale(scale_denominator))
    }
    if !dpi.is_finite() || dpi <= 0. {
        return Err(DomainError::InvalidDpi(dpi))
    }
    let normalized = if scale_denominator > 1. {
        1. / scale_denominator
    }
    else {
        scale_denominator
    };
    Ok(1. / (normalized * INCHES_PER_METER * dpi))
}

/// Returns the number of pixels available for a bar.
pub fn pixel_budget(
    width_budget: u32, panel_width: f64
) -> Result<i64, DomainError> {
    let budget = i64::from(width_budget).min(
        panel_width.round() as i64
    ) - END_CAP_MARGIN;
    if budget <= 0 {
        Err(DomainError::NoPixelBudget(budget))
    }
    else {
        Ok(budget)
    }
}

/// Returns the pixels covered by a number of units.
pub fn pixel_span(rounded_length: u64, unit: &UnitDef, resolution: f64) -> f64 {
    let meters = (rounded_length as f64 / INCHES_PER_METER)
        * unit.inches_per_unit();
    meters / resolution
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ScaleBarConfig;
    use crate::error::ConfigurationError;
    use crate::units::UnitTable;

    const OGC_DPI: f64 = 25.4 / 0.28;

    fn system(name: &str) -> &'static UnitSystem {
        UnitTable::builtin().get(name).unwrap()
    }

    fn metric_bottom() -> ScaleBarConfig {
        ScaleBarConfig::builder()
            .dpi(OGC_DPI)
            .width_budget(100)
            .top_unit(None)
            .bottom_unit(Some(system("metric").clone()))
            .build()
            .unwrap()
    }

    #[test]
    fn metric_at_fifty_thousand() {
        let solution = solve(&metric_bottom(), 50_000., 300.);
        assert!(solution.top.is_none());
        assert!(solution.is_single());
        let bottom = solution.bottom.unwrap();
        assert_eq!(bottom.unit.short_name(), "m");
        assert_eq!(bottom.rounded_length, 1000);
        assert!(bottom.pixel_span <= 94.);
        assert!((bottom.pixel_span - 71.43).abs() < 0.01);
    }

    #[test]
    fn switches_to_kilometers() {
        let bar = solve_bar(
            system("metric"), 1_000_000., OGC_DPI, 100, 300.
        ).unwrap();
        assert_eq!(bar.unit.short_name(), "km");
        assert_eq!(bar.rounded_length, 10);
        assert!(bar.pixel_span <= 94.);
    }

    #[test]
    fn imperial_units() {
        let bar = solve_bar(
            system("imperial"), 50_000., OGC_DPI, 100, 300.
        ).unwrap();
        assert_eq!(bar.unit.short_name(), "yd");
        assert_eq!(bar.rounded_length, 1000);
        assert!(bar.pixel_span <= 94.);
    }

    #[test]
    fn solving_is_pure() {
        let config = ScaleBarConfig::builder().build().unwrap();
        assert_eq!(
            solve(&config, 25_000., 512.), solve(&config, 25_000., 512.)
        );
    }

    #[test]
    fn pixel_span_round_trip() {
        let config = ScaleBarConfig::builder()
            .width_budget(300)
            .build()
            .unwrap();
        for &scale in &[1_000., 12_345., 50_000., 2_500_000., 0.0001] {
            let res = resolution(scale, config.dpi()).unwrap();
            let solution = solve(&config, scale, 1024.);
            for bar in [solution.top, solution.bottom].into_iter().flatten() {
                let meters = bar.rounded_length as f64
                    * bar.unit.inches_per_unit() / INCHES_PER_METER;
                assert!((meters / res - bar.pixel_span).abs() < 1e-9);
                assert!(bar.pixel_span <= 294.);
            }
        }
    }

    #[test]
    fn normalized_scale_is_used_directly() {
        assert_eq!(resolution(0.00002, 1.), resolution(50_000., 1.));
        assert_eq!(resolution(1., 1.).unwrap(), 1. / INCHES_PER_METER);
    }

    #[test]
    fn invalid_scale() {
        assert_eq!(
            solve_bar(system("metric"), 0., OGC_DPI, 100, 300.),
            Err(DomainError::InvalidScale(0.).into())
        );
        assert!(
            solve_bar(system("metric"), f64::NAN, OGC_DPI, 100, 300.).is_err()
        );
        assert!(solve(&metric_bottom(), f64::INFINITY, 300.).is_empty());
    }

    #[test]
    fn extreme_scale_leaves_bar_out() {
        assert!(matches!(
            solve_bar(system("metric"), 1e26, OGC_DPI, 100, 300.),
            Err(BarError::Domain(DomainError::TooLong(_)))
        ));
        assert!(matches!(
            solve_bar(system("metric"), 1e-26, OGC_DPI, 100, 300.),
            Err(BarError::Domain(DomainError::TooLong(_)))
        ));
        assert!(solve(&metric_bottom(), 1e26, 300.).is_empty());
    }

    #[test]
    fn budget_limits() {
        assert_eq!(pixel_budget(100, 300.), Ok(94));
        assert_eq!(pixel_budget(400, 300.), Ok(294));
        assert_eq!(pixel_budget(6, 300.), Err(DomainError::NoPixelBudget(0)));
        assert_eq!(
            solve_bar(system("metric"), 50_000., OGC_DPI, 100, 4.),
            Err(DomainError::NoPixelBudget(-2).into())
        );
    }

    #[test]
    fn one_bad_bar_keeps_the_other() {
        let bounded = UnitSystem::new(vec![
            UnitDef::new("INCH", "in", 1., 10.)
        ]).unwrap();
        assert!(matches!(
            solve_bar(&bounded, 50_000., OGC_DPI, 100, 300.),
            Err(BarError::Configuration(
                ConfigurationError::NoMatchingUnit(_)
            ))
        ));
        let config = ScaleBarConfig::builder()
            .top_unit(Some(bounded))
            .bottom_unit(Some(system("metric").clone()))
            .build()
            .unwrap();
        let solution = solve(&config, 50_000., 300.);
        assert!(solution.top.is_none());
        assert!(solution.bottom.is_some());
    }
}
