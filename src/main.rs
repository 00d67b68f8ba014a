use std::collections::HashMap;
use std::path::PathBuf;
use clap::{
    Arg, ArgAction, ArgMatches, Command, crate_version, crate_authors,
    value_parser,
};
use kurbo::{Point, Rect, Size};
use log::{error, info};
use scaleline::{ScaleLineDecoration, ScaleBarConfig, UnitTable};
use scaleline::config::OptionFile;
use scaleline::error::RenderError;
use scaleline::render::canvas::Canvas;
use scaleline::render::color::Color;
use scaleline::render::output::{Output, OutputFormat};


/// Something went wrong and has been logged already.
struct Failed;


struct Config {
    scale: f64,
    size: Size,
    output: PathBuf,
    format: OutputFormat,
    background: Color,
    options: HashMap<String, String>,
}

impl Config {
    pub fn get() -> Result<Self, Failed> {
        let mut matches = Self::get_matches();

        let mut options = match matches.remove_one::<PathBuf>("config") {
            Some(path) => match OptionFile::load(&path) {
                Ok(file) => file.into_options(),
                Err(err) => {
                    error!(
                        "Failed to read config file {}: {}",
                        path.display(), err
                    );
                    return Err(Failed)
                }
            }
            None => HashMap::new(),
        };
        if let Some(values) = matches.remove_many::<String>("option") {
            for value in values {
                match value.split_once('=') {
                    Some((key, value)) => {
                        options.insert(key.trim().into(), value.into());
                    }
                    None => {
                        error!("Invalid option '{}', expected KEY=VALUE.", value);
                        return Err(Failed)
                    }
                }
            }
        }

        let output = matches.remove_one::<PathBuf>("output").ok_or(Failed)?;
        let format = match matches.remove_one::<OutputFormat>("format") {
            Some(format) => format,
            None => OutputFormat::from_path(&output).unwrap_or(
                OutputFormat::Png
            ),
        };

        let background = matches.remove_one::<String>("background");
        let background = match background {
            Some(value) => match Color::hex(&value) {
                Ok(color) => color,
                Err(err) => {
                    error!("Invalid background color '{}': {}", value, err);
                    return Err(Failed)
                }
            }
            None => Color::TRANSPARENT,
        };

        Ok(Config {
            scale: matches.remove_one("scale").ok_or(Failed)?,
            size: Size::new(
                matches.remove_one("width").ok_or(Failed)?,
                matches.remove_one("height").ok_or(Failed)?,
            ),
            output,
            format,
            background,
            options,
        })
    }

    fn get_matches() -> ArgMatches {
        Command::new("scaleline")
            .version(crate_version!())
            .author(crate_authors!())
            .about("renders a map scale line")
            .arg(Arg::new("scale")
                .short('s')
                .long("scale")
                .value_name("DENOMINATOR")
                .value_parser(value_parser!(f64))
                .help("the map scale denominator, e.g., 50000 for 1:50000")
                .required(true)
                .action(ArgAction::Set)
            )
            .arg(Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .value_parser(value_parser!(f64))
                .help("the width of the image")
                .action(ArgAction::Set)
                .default_value("300")
            )
            .arg(Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .value_parser(value_parser!(f64))
                .help("the height of the image")
                .action(ArgAction::Set)
                .default_value("100")
            )
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("the file to write the image to")
                .required(true)
                .action(ArgAction::Set)
            )
            .arg(Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(|s: &str| s.parse::<OutputFormat>())
                .help("the image format, 'png' or 'svg'")
                .action(ArgAction::Set)
            )
            .arg(Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("a TOML file with decoration options")
                .action(ArgAction::Set)
            )
            .arg(Arg::new("option")
                .short('O')
                .long("option")
                .value_name("KEY=VALUE")
                .help("a decoration option, overriding the config file")
                .action(ArgAction::Append)
            )
            .arg(Arg::new("background")
                .short('b')
                .long("background")
                .value_name("COLOR")
                .help("the color of the image behind the decoration")
                .action(ArgAction::Set)
            )
            .get_matches()
    }

    fn run(self) -> Result<(), Failed> {
        let config = ScaleBarConfig::from_options(
            &self.options, UnitTable::builtin()
        ).map_err(|err| {
            error!("Invalid decoration options: {}", err);
            Failed
        })?;
        let decoration = ScaleLineDecoration::new(config);

        self.render(&decoration).map_err(|err| {
            error!(
                "Failed to render {}: {}", self.output.display(), err
            );
            Failed
        })
    }

    fn render(
        &self, decoration: &ScaleLineDecoration
    ) -> Result<(), RenderError> {
        let output = Output::create(self.format, self.size, &self.output)?;
        let canvas = Canvas::new(&output, self.size)?;
        let area = Rect::from_origin_size(Point::ORIGIN, self.size);

        self.background.apply(&canvas);
        canvas.paint()?;

        let solution = decoration.paint(&canvas, area, &self.scale)?;
        drop(canvas);
        output.finish()?;

        for bar in [solution.top, solution.bottom].into_iter().flatten() {
            info!(
                "{}{} over {:.1} pixels",
                bar.rounded_length, bar.unit.short_name(), bar.pixel_span
            );
        }
        Ok(())
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();

    let config = match Config::get() {
        Ok(config) => config,
        Err(_) => std::process::exit(1),
    };
    if config.run().is_err() {
        std::process::exit(1)
    }
}
