//! Surfaces for standalone output files.

use std::{fmt, fs, ops};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use kurbo::Size;
use crate::error::RenderError;


//------------ OutputFormat --------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Guesses the format from the extension of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_str(path.extension()?.to_str()?).ok()
    }
}

impl FromStr for OutputFormat {
    type Err = InvalidOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(InvalidOutputFormat),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        })
    }
}


//------------ Output --------------------------------------------------------

/// A surface that is written to a file once drawing has finished.
pub enum Output {
    Png(cairo::ImageSurface, PathBuf),
    Svg(cairo::SvgSurface),
}

impl Output {
    pub fn create(
        format: OutputFormat, size: Size, path: impl Into<PathBuf>,
    ) -> Result<Self, RenderError> {
        let path = path.into();
        match format {
            OutputFormat::Png => {
                Ok(Output::Png(
                    cairo::ImageSurface::create(
                        cairo::Format::ARgb32,
                        size.width.ceil() as i32,
                        size.height.ceil() as i32,
                    )?,
                    path
                ))
            }
            OutputFormat::Svg => {
                Ok(Output::Svg(
                    cairo::SvgSurface::new(size.width, size.height, Some(path))?
                ))
            }
        }
    }

    /// Finishes drawing and writes the file.
    ///
    /// Any canvas created for the surface must have been dropped.
    pub fn finish(self) -> Result<(), RenderError> {
        match self {
            Output::Png(surface, path) => {
                let mut file = fs::File::create(path)?;
                surface.write_to_png(&mut file)?;
            }
            Output::Svg(surface) => {
                surface.finish();
                surface.status()?;
            }
        }
        Ok(())
    }
}

impl ops::Deref for Output {
    type Target = cairo::Surface;

    fn deref(&self) -> &Self::Target {
        match *self {
            Output::Png(ref surface, _) => surface,
            Output::Svg(ref surface) => surface
        }
    }
}


//------------ InvalidOutputFormat -------------------------------------------

#[derive(Clone, Copy, Debug)]
pub struct InvalidOutputFormat;

impl fmt::Display for InvalidOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("output format must be 'png' or 'svg'")
    }
}

impl std::error::Error for InvalidOutputFormat { }


//============ Tests =========================================================
