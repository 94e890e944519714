pub mod influx;

use crate::{core::point::Point, error::WriteError};

/// Time series store accepting all points of a run at once.
pub trait WritePoints {
    async fn write_points(&self, points: &[Point]) -> Result<(), WriteError>;
}
