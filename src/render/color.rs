//! Colors.

use std::fmt;
use std::num::ParseIntError;
use super::canvas::Canvas;


/// A color.
///
/// Components are in the range from 0 to 1 and not premultiplied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64
}

impl Color {
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Color { red, green, blue, alpha: 1. }
    }

    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Color { red, green, blue, alpha }
    }

    /// Parses a color from `RRGGBB` or `RRGGBBAA` hex digits.
    ///
    /// A leading `#` is optional.
    pub fn hex(hex: &str) -> Result<Self, InvalidHexColor> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(InvalidHexColor)
        }
        let (r, g, b, a) = if hex.len() == 6 {
            (
                u8::from_str_radix(&hex[0..2], 16)?,
                u8::from_str_radix(&hex[2..4], 16)?,
                u8::from_str_radix(&hex[4..6], 16)?,
                0xFF,
            )
        }
        else if hex.len() == 8 {
            (
                u8::from_str_radix(&hex[0..2], 16)?,
                u8::from_str_radix(&hex[2..4], 16)?,
                u8::from_str_radix(&hex[4..6], 16)?,
                u8::from_str_radix(&hex[6..8], 16)?,
            )
        }
        else {
            return Err(InvalidHexColor)
        };
        Ok(Color::rgba(
            r as f64 / 255.,
            g as f64 / 255.,
            b as f64 / 255.,
            a as f64 / 255.,
        ))
    }

    /// Makes the color the source of the canvas.
    pub fn apply(self, canvas: &Canvas) {
        canvas.set_source_rgba(self.red, self.green, self.blue, self.alpha)
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(1., 1., 1.);
    pub const BLACK: Color = Color::rgb(0., 0., 0.);
    pub const TRANSPARENT: Color = Color::rgba(0., 0., 0., 0.);
}


//------------ InvalidHexColor -----------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidHexColor;

impl From<ParseIntError> for InvalidHexColor {
    fn from(_: ParseIntError) -> Self {
        InvalidHexColor
    }
}

impl fmt::Display for InvalidHexColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid color")
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!(Color::hex("#ffffff"), Ok(Color::WHITE));
        assert_eq!(Color::hex("000000"), Ok(Color::BLACK));
        assert_eq!(Color::hex("00000000"), Ok(Color::TRANSPARENT));
        assert_eq!(
            Color::hex("#FF000080"),
            Ok(Color::rgba(1., 0., 0., 128. / 255.))
        );
    }

    #[test]
    fn reject_bad_hex() {
        assert_eq!(Color::hex(""), Err(InvalidHexColor));
        assert_eq!(Color::hex("#fff"), Err(InvalidHexColor));
        assert_eq!(Color::hex("#gg0000"), Err(InvalidHexColor));
        assert_eq!(Color::hex("ä0000"), Err(InvalidHexColor));
    }
}
