//! The units a scale bar can be labelled in.
//!
//! A unit system is an ordered list of units from the smallest to the
//! largest. Each unit knows how many inches it has and up to which length
//! it should be used before switching to the next larger one. Lengths
//! compared against these limits are always real-world inches.

use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::error::ConfigurationError;


/// Inches in a meter.
///
/// The meter is the reference unit for all distance arithmetic, whatever
/// system a bar is eventually labelled in.
pub const INCHES_PER_METER: f64 = 39.3701;


//------------ UnitDef -------------------------------------------------------

/// A single display unit.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitDef {
    /// The name shown above a lone bar.
    long_name: String,

    /// The abbreviation appended to numbers.
    short_name: String,

    /// The length of one unit in inches.
    inches_per_unit: f64,

    /// The length in inches from which on the next unit takes over.
    ///
    /// A value of zero means the unit is never replaced.
    max_unit_number: f64,
}

impl UnitDef {
    pub fn new(
        long_name: impl Into<String>,
        short_name: impl Into<String>,
        inches_per_unit: f64,
        max_unit_number: f64,
    ) -> Self {
        UnitDef {
            long_name: long_name.into(),
            short_name: short_name.into(),
            inches_per_unit,
            max_unit_number,
        }
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn inches_per_unit(&self) -> f64 {
        self.inches_per_unit
    }

    /// Returns whether the unit is used for arbitrarily large lengths.
    pub fn is_unbounded(&self) -> bool {
        self.max_unit_number == 0.
    }

    /// Returns whether the unit should display the given length.
    fn covers(&self, length: f64) -> bool {
        self.is_unbounded() || self.max_unit_number > length
    }
}


//------------ UnitSystem ----------------------------------------------------

/// An ordered, non-empty list of units.
///
/// At most one unit is unbounded and if there is one, it is the last.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSystem {
    units: Vec<UnitDef>,
}

impl UnitSystem {
    /// Creates a unit system from units ordered smallest to largest.
    pub fn new(units: Vec<UnitDef>) -> Result<Self, ConfigurationError> {
        if units.is_empty() {
            return Err(ConfigurationError::EmptySystem)
        }
        for (index, unit) in units.iter().enumerate() {
            if !unit.inches_per_unit.is_finite() || unit.inches_per_unit <= 0.
            {
                return Err(ConfigurationError::InvalidUnitFactor {
                    name: unit.long_name.clone(),
                    value: unit.inches_per_unit,
                })
            }
            if !unit.max_unit_number.is_finite() || unit.max_unit_number < 0.
            {
                return Err(ConfigurationError::InvalidUnitLimit {
                    name: unit.long_name.clone(),
                    value: unit.max_unit_number,
                })
            }
            if unit.is_unbounded() && index + 1 != units.len() {
                return Err(ConfigurationError::MisplacedUnbounded(
                    unit.long_name.clone()
                ))
            }
        }
        Ok(UnitSystem { units })
    }

    /// Returns the base unit, i.e., the smallest unit of the system.
    pub fn base(&self) -> &UnitDef {
        &self.units[0]
    }

    pub fn units(&self) -> &[UnitDef] {
        &self.units
    }

    /// Selects the unit to display a length of `candidate` inches in.
    ///
    /// This is the first unit whose limit is larger than `candidate` or
    /// that has no limit at all. Fails only for systems without an
    /// unbounded last unit.
    pub fn select_unit(
        &self, candidate: f64
    ) -> Result<&UnitDef, ConfigurationError> {
        self.units.iter().find(|unit| unit.covers(candidate)).ok_or(
            ConfigurationError::NoMatchingUnit(candidate)
        )
    }
}


//------------ UnitTable -----------------------------------------------------

/// A set of named unit systems.
///
/// The built-in table is available via [`UnitTable::builtin`]. Callers
/// wanting additional systems clone it and insert their own.
#[derive(Clone, Debug, Default)]
pub struct UnitTable {
    systems: HashMap<String, UnitSystem>,
}

impl UnitTable {
    /// Returns the shared table of built-in systems.
    pub fn builtin() -> &'static UnitTable {
        &BUILTIN
    }

    /// Returns the system with the given name.
    ///
    /// Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&UnitSystem> {
        self.systems.get(name)
    }

    /// Adds a system, replacing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, system: UnitSystem) {
        self.systems.insert(name.into(), system);
    }

    /// Returns the names of all systems in the table.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    fn create_builtin() -> Self {
        fn system(
            units: &[(&str, &str, f64, f64)]
        ) -> UnitSystem {
            UnitSystem {
                units: units.iter().map(|&(long, short, inches, max)| {
                    UnitDef::new(long, short, inches, max)
                }).collect()
            }
        }

        let mut res = UnitTable::default();
        res.insert("metric", system(&[
            ("METER", "m", INCHES_PER_METER, 100_000.),
            ("KILOMETER", "km", 1_000. * INCHES_PER_METER, 0.),
        ]));
        res.insert("imperial", system(&[
            ("FEET", "ft", 12., 20_000.),
            ("YARD", "yd", 36., 100_000.),
            ("MILE", "mi", 63_360., 0.),
        ]));
        res.insert("oldimperial", system(&[
            ("FEET", "ft", 12., 100_000.),
            ("MILE", "mi", 63_360., 0.),
        ]));
        res.insert("nautical", system(&[
            ("NAUTICAL MILE", "nmi", 72_913.4, 0.),
        ]));
        res.insert("decimal", system(&[
            ("DECIMAL DEGREES", "dd", 4_374_754., 0.),
        ]));
        res
    }
}

lazy_static! {
    static ref BUILTIN: UnitTable = UnitTable::create_builtin();
}


//============ Tests =========================================================
