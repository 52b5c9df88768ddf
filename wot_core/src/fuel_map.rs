//! Square fuel table indexed by (load bin, RPM bin), both 0-based.

use std::ops::Index;

use crate::error::TunerError;

#[derive(Debug, Clone, PartialEq)]
pub struct FuelMap {
    size: usize,
    /// Row-major: `values[load * size + rpm]`.
    values: Vec<f64>,
}

impl FuelMap {
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            values: vec![value; size * size],
        }
    }

    /// Build from rows; every row must have as many values as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TunerError> {
        let size = rows.len();
        if size == 0 {
            return Err(TunerError::Config("fuel map has no rows".into()));
        }
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(TunerError::Config(format!(
                    "fuel map row {} has {} values, expected {}",
                    i + 1,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, load: usize, rpm: usize) -> Option<f64> {
        if load < self.size && rpm < self.size {
            Some(self.values[load * self.size + rpm])
        } else {
            None
        }
    }

    pub fn set(&mut self, load: usize, rpm: usize, value: f64) {
        assert!(
            load < self.size && rpm < self.size,
            "cell ({load}, {rpm}) outside {0}x{0} map",
            self.size
        );
        self.values[load * self.size + rpm] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for FuelMap {
    type Output = f64;

    fn index(&self, (load, rpm): (usize, usize)) -> &f64 {
        assert!(
            load < self.size && rpm < self.size,
            "cell ({load}, {rpm}) outside {0}x{0} map",
            self.size
        );
        &self.values[load * self.size + rpm]
    }
}

#[cfg(test)]
mod tests {
    use super::FuelMap;

    fn map() -> FuelMap {
        FuelMap::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn indexes_by_load_then_rpm() {
        let m = map();
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "cell (2, 0) outside 2x2 map")]
    fn load_out_of_range_names_the_cell() {
        let _ = map()[(2, 0)];
    }

    #[test]
    #[should_panic(expected = "cell (0, 2) outside 2x2 map")]
    fn rpm_out_of_range_names_the_cell() {
        let _ = map()[(0, 2)];
    }
}
