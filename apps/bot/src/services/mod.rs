//! Auxiliary bot services outside the music catalog

mod balaboba;
mod weather;

pub use balaboba::{BalabobaClient, BalabobaError, BalabobaResult};
pub use weather::{WeatherClient, WeatherError, WeatherReport, WeatherResult};
