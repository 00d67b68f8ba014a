//! Configuration of a scale line decoration.
//!
//! A [`ScaleBarConfig`] is created once through its builder, either by
//! setting values directly or by loading free-form string options as they
//! appear in decoration layouts. Afterwards it is read-only.

use std::{fmt, fs, io};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use log::{debug, warn};
use serde::Deserialize;
use crate::error::OptionError;
use crate::render::color::Color;
use crate::units::{UnitSystem, UnitTable};


//------------ Alignment -----------------------------------------------------

/// How bars of different length are aligned with each other.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Alignment {
    /// The left ends of both bars coincide.
    #[default]
    Left,

    /// The centers of both bars coincide.
    Center,

    /// The right ends of both bars coincide.
    Right,
}

impl FromStr for Alignment {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(OptionError::Alignment(s.into()))
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        })
    }
}


//------------ MeasurementSystem ---------------------------------------------

/// The legacy selection of unit systems.
///
/// This predates choosing the top and bottom systems separately.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeasurementSystem {
    /// Metric on the bottom only.
    Metric,

    /// Feet and miles on the bottom only.
    Imperial,

    /// Feet and miles on top, metric on the bottom.
    Both,
}

impl MeasurementSystem {
    /// Returns the names of the top and bottom systems.
    pub fn unit_names(self) -> (Option<&'static str>, &'static str) {
        match self {
            MeasurementSystem::Metric => (None, "metric"),
            MeasurementSystem::Imperial => (None, "oldimperial"),
            MeasurementSystem::Both => (Some("oldimperial"), "metric"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            "both" => Ok(MeasurementSystem::Both),
            _ => Err(OptionError::MeasurementSystem(s.into()))
        }
    }
}


//------------ ScaleBarConfig ------------------------------------------------

/// The immutable configuration of a scale line.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarConfig {
    font_size: f64,
    dpi: f64,
    stroke_width: f64,
    bg_color: Color,
    fg_color: Color,
    transparent: bool,
    width_budget: u32,
    alignment: Alignment,
    top_unit: Option<UnitSystem>,
    bottom_unit: Option<UnitSystem>,
}

impl ScaleBarConfig {
    /// The default dpi as given by the OGC for 0.28 mm pixels.
    pub const DEFAULT_DPI: f64 = 25.4 / 0.28;

    pub fn builder() -> ScaleBarConfigBuilder {
        ScaleBarConfigBuilder::new()
    }

    /// Creates a configuration from decoration options.
    ///
    /// Invalid options are logged and ignored.
    pub fn from_options(
        options: &HashMap<String, String>, table: &UnitTable,
    ) -> Result<Self, OptionError> {
        Self::builder().load_options(options, table).build()
    }

    /// The font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    pub fn fg_color(&self) -> Color {
        self.fg_color
    }

    /// Whether the background frame is left out.
    pub fn transparent(&self) -> bool {
        self.transparent
    }

    /// The maximum width of the bars in pixels.
    ///
    /// For historical reasons, the option setting this is called
    /// `scalewidthpercent`. Values of 200 and more also add a center tick
    /// and label.
    pub fn width_budget(&self) -> u32 {
        self.width_budget
    }

    /// Whether bars get a tick and label in the middle.
    pub fn has_center_tick(&self) -> bool {
        self.width_budget >= 200
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn top_unit(&self) -> Option<&UnitSystem> {
        self.top_unit.as_ref()
    }

    pub fn bottom_unit(&self) -> Option<&UnitSystem> {
        self.bottom_unit.as_ref()
    }
}

impl Default for ScaleBarConfig {
    fn default() -> Self {
        let table = UnitTable::builtin();
        ScaleBarConfig {
            font_size: 10.,
            dpi: Self::DEFAULT_DPI,
            stroke_width: 2.,
            bg_color: Color::WHITE,
            fg_color: Color::BLACK,
            transparent: false,
            width_budget: 100,
            alignment: Alignment::default(),
            top_unit: table.get("imperial").cloned(),
            bottom_unit: table.get("metric").cloned(),
        }
    }
}


//------------ ScaleBarConfigBuilder -----------------------------------------

/// Collects the values for a [`ScaleBarConfig`].
#[derive(Clone, Debug, Default)]
pub struct ScaleBarConfigBuilder {
    config: ScaleBarConfig,
}

impl ScaleBarConfigBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.config.font_size = size;
        self
    }

    pub fn dpi(mut self, dpi: f64) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.config.stroke_width = width;
        self
    }

    pub fn bg_color(mut self, color: Color) -> Self {
        self.config.bg_color = color;
        self
    }

    pub fn fg_color(mut self, color: Color) -> Self {
        self.config.fg_color = color;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.config.transparent = transparent;
        self
    }

    pub fn width_budget(mut self, budget: u32) -> Self {
        self.config.width_budget = budget;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.config.alignment = alignment;
        self
    }

    pub fn top_unit(mut self, system: Option<UnitSystem>) -> Self {
        self.config.top_unit = system;
        self
    }

    pub fn bottom_unit(mut self, system: Option<UnitSystem>) -> Self {
        self.config.bottom_unit = system;
        self
    }

    /// Applies free-form decoration options.
    ///
    /// Unknown keys are ignored. Values that fail to parse are logged and
    /// leave the current value in place. The legacy `measurement-system`
    /// is applied before `topunit` and `bottomunit` so these win.
    pub fn load_options(
        mut self, options: &HashMap<String, String>, table: &UnitTable,
    ) -> Self {
        let opts = Options { options };

        if let Some(value) = opts.get("fontsize", parse_positive) {
            self.config.font_size = value;
        }
        if let Some(value) = opts.get("dpi", parse_positive) {
            self.config.dpi = value;
        }
        if let Some(value) = opts.get("strokewidth", parse_non_negative) {
            self.config.stroke_width = value;
        }
        if let Some(value) = opts.get("bgcolor", parse_color) {
            self.config.bg_color = value;
        }
        if let Some(value) = opts.get("fgcolor", parse_color) {
            self.config.fg_color = value;
        }
        if let Some(value) = opts.get("transparent", parse_bool) {
            self.config.transparent = value;
        }
        if let Some(value) = opts.get("measurement-system", |_, value| {
            MeasurementSystem::from_str(value)
        }) {
            let (top, bottom) = value.unit_names();
            self.config.top_unit = top.and_then(|name| table.get(name)).cloned();
            self.config.bottom_unit = table.get(bottom).cloned();
        }
        if let Some(value) = opts.get("scalewidthpercent", parse_budget) {
            self.config.width_budget = value;
        }
        if let Some(value) = opts.get("alignment", |_, value| {
            Alignment::from_str(value)
        }) {
            self.config.alignment = value;
        }
        if let Some(value) = opts.get("topunit", |key, value| {
            parse_unit(key, value, table)
        }) {
            self.config.top_unit = value;
        }
        if let Some(value) = opts.get("bottomunit", |key, value| {
            parse_unit(key, value, table)
        }) {
            self.config.bottom_unit = value;
        }
        self
    }

    /// Checks the collected values and creates the configuration.
    pub fn build(self) -> Result<ScaleBarConfig, OptionError> {
        check_positive("fontsize", self.config.font_size)?;
        check_positive("dpi", self.config.dpi)?;
        check_non_negative("strokewidth", self.config.stroke_width)?;
        if self.config.width_budget == 0 {
            return Err(OptionError::OutOfRange {
                key: "scalewidthpercent", value: 0.
            })
        }
        Ok(self.config)
    }
}


//------------ Options -------------------------------------------------------

/// Typed access to the string options.
struct Options<'a> {
    options: &'a HashMap<String, String>,
}

impl<'a> Options<'a> {
    fn get<T, F>(&self, key: &'static str, parse: F) -> Option<T>
    where F: FnOnce(&'static str, &str) -> Result<T, OptionError> {
        let value = self.options.get(key)?;
        debug!("scale line option {} = '{}'", key, value);
        match parse(key, value.trim()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Ignoring scale line option: {}", err);
                None
            }
        }
    }
}

fn parse_float(key: &'static str, value: &str) -> Result<f64, OptionError> {
    f64::from_str(value).map_err(|_| OptionError::Float {
        key, value: value.into()
    })
}

fn parse_positive(key: &'static str, value: &str) -> Result<f64, OptionError> {
    let res = parse_float(key, value)?;
    check_positive(key, res)?;
    Ok(res)
}

fn parse_non_negative(
    key: &'static str, value: &str
) -> Result<f64, OptionError> {
    let res = parse_float(key, value)?;
    check_non_negative(key, res)?;
    Ok(res)
}

fn parse_budget(key: &'static str, value: &str) -> Result<u32, OptionError> {
    let res = i64::from_str(value).map_err(|_| OptionError::Integer {
        key, value: value.into()
    })?;
    if res <= 0 || res > i64::from(u32::MAX) {
        return Err(OptionError::OutOfRange { key, value: res as f64 })
    }
    Ok(res as u32)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, OptionError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    }
    else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    }
    else {
        Err(OptionError::Bool { key, value: value.into() })
    }
}

fn parse_color(key: &'static str, value: &str) -> Result<Color, OptionError> {
    Color::hex(value).map_err(|_| OptionError::Color {
        key, value: value.into()
    })
}

fn parse_unit(
    key: &'static str, value: &str, table: &UnitTable
) -> Result<Option<UnitSystem>, OptionError> {
    if value == "none" {
        return Ok(None)
    }
    match table.get(value) {
        Some(system) => Ok(Some(system.clone())),
        None => Err(OptionError::UnknownUnit { key, value: value.into() })
    }
}

fn check_positive(key: &'static str, value: f64) -> Result<(), OptionError> {
    if value.is_finite() && value > 0. {
        Ok(())
    }
    else {
        Err(OptionError::OutOfRange { key, value })
    }
}

fn check_non_negative(
    key: &'static str, value: f64
) -> Result<(), OptionError> {
    if value.is_finite() && value >= 0. {
        Ok(())
    }
    else {
        Err(OptionError::OutOfRange { key, value })
    }
}


//------------ OptionFile ----------------------------------------------------

/// A TOML file with decoration options.
///
/// The options live in an `[options]` table. Values may be strings,
/// numbers, or booleans.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OptionFile {
    #[serde(default)]
    options: HashMap<String, toml::Value>,
}

impl OptionFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self, io::Error> {
        toml::from_str(data).map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidData, err)
        })
    }

    /// Returns the options as strings.
    pub fn into_options(self) -> HashMap<String, String> {
        self.options.into_iter().map(|(key, value)| {
            let value = match value {
                toml::Value::String(value) => value,
                value => value.to_string(),
            };
            (key, value)
        }).collect()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(items: &[(&str, &str)]) -> HashMap<String, String> {
        items.iter().map(|&(key, value)| (key.into(), value.into())).collect()
    }

    fn load(items: &[(&str, &str)]) -> ScaleBarConfig {
        ScaleBarConfig::from_options(
            &options(items), UnitTable::builtin()
        ).unwrap()
    }

    fn unit(name: &str) -> Option<UnitSystem> {
        UnitTable::builtin().get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = load(&[]);
        assert_eq!(config, ScaleBarConfig::default());
        assert_eq!(config.font_size(), 10.);
        assert_eq!(config.stroke_width(), 2.);
        assert_eq!(config.width_budget(), 100);
        assert_eq!(config.alignment(), Alignment::Left);
        assert_eq!(config.top_unit().cloned(), unit("imperial"));
        assert_eq!(config.bottom_unit().cloned(), unit("metric"));
        assert!(!config.transparent());
        assert!(!config.has_center_tick());
    }

    #[test]
    fn all_options() {
        let config = load(&[
            ("fontsize", "12.5"),
            ("dpi", "96"),
            ("strokewidth", "3"),
            ("bgcolor", "#112233"),
            ("fgcolor", "445566CC"),
            ("transparent", "TRUE"),
            ("scalewidthpercent", "250"),
            ("alignment", "Right"),
            ("topunit", "nautical"),
            ("bottomunit", "decimal"),
        ]);
        assert_eq!(config.font_size(), 12.5);
        assert_eq!(config.dpi(), 96.);
        assert_eq!(config.stroke_width(), 3.);
        assert_eq!(config.bg_color(), Color::hex("112233").unwrap());
        assert_eq!(config.fg_color(), Color::hex("#445566cc").unwrap());
        assert!(config.transparent());
        assert_eq!(config.width_budget(), 250);
        assert!(config.has_center_tick());
        assert_eq!(config.alignment(), Alignment::Right);
        assert_eq!(config.top_unit().cloned(), unit("nautical"));
        assert_eq!(config.bottom_unit().cloned(), unit("decimal"));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = load(&[
            ("fontsize", "big"),
            ("dpi", "-3"),
            ("strokewidth", "NaN"),
            ("bgcolor", "#12"),
            ("transparent", "yes"),
            ("scalewidthpercent", "12.5"),
            ("alignment", "middle"),
            ("topunit", "furlongs"),
            ("bottomunit", "Metric"),
            ("measurement-system", "cubits"),
        ]);
        assert_eq!(config, ScaleBarConfig::default());
    }

    #[test]
    fn measurement_system() {
        let config = load(&[("measurement-system", "metric")]);
        assert_eq!(config.top_unit(), None);
        assert_eq!(config.bottom_unit().cloned(), unit("metric"));

        let config = load(&[("measurement-system", "imperial")]);
        assert_eq!(config.top_unit(), None);
        assert_eq!(config.bottom_unit().cloned(), unit("oldimperial"));

        let config = load(&[("measurement-system", "both")]);
        assert_eq!(config.top_unit().cloned(), unit("oldimperial"));
        assert_eq!(config.bottom_unit().cloned(), unit("metric"));
    }

    #[test]
    fn explicit_units_win() {
        let config = load(&[
            ("measurement-system", "metric"),
            ("topunit", "imperial"),
            ("bottomunit", "nautical"),
        ]);
        assert_eq!(config.top_unit().cloned(), unit("imperial"));
        assert_eq!(config.bottom_unit().cloned(), unit("nautical"));
    }

    #[test]
    fn clear_a_side() {
        let config = load(&[("topunit", "none")]);
        assert_eq!(config.top_unit(), None);
        assert_eq!(config.bottom_unit().cloned(), unit("metric"));
    }

    #[test]
    fn caller_defined_system() {
        use crate::units::UnitDef;

        let mut table = UnitTable::builtin().clone();
        table.insert("furlongs", UnitSystem::new(vec![
            UnitDef::new("FURLONG", "fur", 7920., 0.)
        ]).unwrap());
        let config = ScaleBarConfig::from_options(
            &options(&[("bottomunit", "furlongs")]), &table
        ).unwrap();
        assert_eq!(
            config.bottom_unit().unwrap().base().short_name(), "fur"
        );
    }

    #[test]
    fn builder_validates() {
        assert!(ScaleBarConfig::builder().font_size(0.).build().is_err());
        assert!(ScaleBarConfig::builder().dpi(f64::NAN).build().is_err());
        assert!(
            ScaleBarConfig::builder().stroke_width(-1.).build().is_err()
        );
        assert!(ScaleBarConfig::builder().width_budget(0).build().is_err());
        assert!(ScaleBarConfig::builder().stroke_width(0.).build().is_ok());
    }

    #[test]
    fn option_file() {
        let file = OptionFile::from_toml(
            "[options]\n\
             fontsize = 14\n\
             transparent = true\n\
             alignment = \"center\"\n\
             strokewidth = 1.5\n"
        ).unwrap();
        let config = load(
            &file.into_options().iter().map(|(k, v)| {
                (k.as_str(), v.as_str())
            }).collect::<Vec<_>>()
        );
        assert_eq!(config.font_size(), 14.);
        assert!(config.transparent());
        assert_eq!(config.alignment(), Alignment::Center);
        assert_eq!(config.stroke_width(), 1.5);
    }

    #[test]
    fn alignment_round_trip() {
        for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
            assert_eq!(
                Alignment::from_str(&alignment.to_string()), Ok(alignment)
            );
        }
    }
}
