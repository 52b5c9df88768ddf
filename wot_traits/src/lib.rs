//! Seam traits between the tuning core and whatever stores fuel maps.
//!
//! Maps cross this boundary as plain rows (`Vec<Vec<f64>>`, outer index = load
//! bin, inner index = RPM bin) so that implementors need no dependency on the
//! core crate.

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Something the current fuel map can be read from.
pub trait MapSource {
    /// Return exactly `size` rows of `size` values each.
    fn read_map(&mut self, size: usize) -> Result<Vec<Vec<f64>>, BoxError>;
}

/// Something a computed fuel map can be persisted to.
pub trait MapSink {
    fn write_map(&mut self, rows: &[Vec<f64>]) -> Result<(), BoxError>;
}

impl<T: MapSink + ?Sized> MapSink for &mut T {
    fn write_map(&mut self, rows: &[Vec<f64>]) -> Result<(), BoxError> {
        (**self).write_map(rows)
    }
}

impl<T: MapSource + ?Sized> MapSource for &mut T {
    fn read_map(&mut self, size: usize) -> Result<Vec<Vec<f64>>, BoxError> {
        (**self).read_map(size)
    }
}
