pub use self::config::{Alignment, ScaleBarConfig};
pub use self::decoration::{MapContext, ScaleLineDecoration};
pub use self::solver::{BarSpec, Solution};
pub use self::units::{UnitDef, UnitSystem, UnitTable};

pub mod config;
pub mod decoration;
pub mod error;
pub mod layout;
pub mod length;
pub mod render;
pub mod solver;
pub mod units;
