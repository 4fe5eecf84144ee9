pub mod error;
pub mod logger;
pub mod image;
pub mod io;
pub mod numerics;
pub mod sensors;
pub mod sfm;
pub mod mvs;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use error::{PmvsError, PmvsResult};
pub use logger::{init_logger, init_logger_with_level};
pub use mvs::{patch::{Patch, PatchRecord}, registry::PhotoRegistry, runtime_parameters::MatchingParameters};
