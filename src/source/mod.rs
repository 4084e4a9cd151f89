//! Data sources: validated (independent, dependent) vector pairs

mod table;

pub use table::{Column, TableSource};

use crate::error::DataError;

/// Provider of a checked pair of numeric vectors.
///
/// Both accessors fail with [`DataError::NotPopulated`] until the provider
/// holds data. Once populated, the independent values are strictly
/// increasing, both vectors are non-empty and have equal length, and the
/// current bounds have already been applied.
pub trait DataSource: std::fmt::Debug {
    /// Independent (x) values inside the current bounds
    fn independent_values(&self) -> Result<&[f64], DataError>;

    /// Dependent (y) values matching [`DataSource::independent_values`] by index
    fn dependent_values(&self) -> Result<&[f64], DataError>;

    /// Whether both vectors are available
    fn is_complete(&self) -> bool {
        self.independent_values().is_ok() && self.dependent_values().is_ok()
    }

    /// Current inclusive bounds on the independent values
    fn bounds(&self) -> (Option<f64>, Option<f64>);

    /// Replace the bounds and re-filter; on error the previous bounds stay active
    fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), DataError>;

    /// Boxed copy, so series owning a trait object stay cloneable
    fn clone_box(&self) -> Box<dyn DataSource>;
}

impl Clone for Box<dyn DataSource> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// In-memory data source holding the raw vectors and their bounded view
#[derive(Debug, Clone)]
pub struct VectorSource {
    raw_independent: Vec<f64>,
    raw_dependent: Vec<f64>,
    independent: Vec<f64>,
    dependent: Vec<f64>,
    min_bound: Option<f64>,
    max_bound: Option<f64>,
}

impl VectorSource {
    /// Validate a vector pair with no bounds applied
    pub fn new(independent: Vec<f64>, dependent: Vec<f64>) -> Result<Self, DataError> {
        validate_pair(&independent, &dependent)?;
        Ok(Self {
            independent: independent.clone(),
            dependent: dependent.clone(),
            raw_independent: independent,
            raw_dependent: dependent,
            min_bound: None,
            max_bound: None,
        })
    }

    /// Validate a vector pair and apply inclusive bounds to the independent values
    pub fn with_bounds(
        independent: Vec<f64>,
        dependent: Vec<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, DataError> {
        let mut source = Self::new(independent, dependent)?;
        source.set_bounds(min, max)?;
        Ok(source)
    }

    /// Number of points inside the bounds
    pub fn len(&self) -> usize {
        self.independent.len()
    }

    /// Always false for a constructed source; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.independent.is_empty()
    }
}

impl DataSource for VectorSource {
    fn independent_values(&self) -> Result<&[f64], DataError> {
        Ok(&self.independent)
    }

    fn dependent_values(&self) -> Result<&[f64], DataError> {
        Ok(&self.dependent)
    }

    fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min_bound, self.max_bound)
    }

    fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), DataError> {
        let (independent, dependent) =
            apply_bounds(&self.raw_independent, &self.raw_dependent, min, max)?;
        self.independent = independent;
        self.dependent = dependent;
        self.min_bound = min;
        self.max_bound = max;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn DataSource> {
        Box::new(self.clone())
    }
}

/// Check shape, finiteness and monotonicity of a vector pair
pub(crate) fn validate_pair(independent: &[f64], dependent: &[f64]) -> Result<(), DataError> {
    if independent.is_empty() {
        return Err(DataError::Empty {
            param: "independent",
        });
    }
    if dependent.is_empty() {
        return Err(DataError::Empty { param: "dependent" });
    }
    if independent.len() != dependent.len() {
        return Err(DataError::LengthMismatch {
            independent: independent.len(),
            dependent: dependent.len(),
        });
    }
    if let Some(index) = independent.iter().position(|v| !v.is_finite()) {
        return Err(DataError::NonFinite {
            param: "independent",
            index,
        });
    }
    if let Some(index) = dependent.iter().position(|v| !v.is_finite()) {
        return Err(DataError::NonFinite {
            param: "dependent",
            index,
        });
    }
    if let Some(index) = independent.windows(2).position(|w| w[1] <= w[0]) {
        return Err(DataError::NotIncreasing { index: index + 1 });
    }
    Ok(())
}

/// Keep the points whose independent value lies in `[min, max]`
fn apply_bounds(
    independent: &[f64],
    dependent: &[f64],
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    if let (Some(lo), Some(hi)) = (min, max)
        && lo > hi
    {
        return Err(DataError::InvertedBounds { min: lo, max: hi });
    }

    let (kept_x, kept_y): (Vec<f64>, Vec<f64>) = independent
        .iter()
        .zip(dependent)
        .filter(|&(&x, _)| min.is_none_or(|lo| x >= lo) && max.is_none_or(|hi| x <= hi))
        .map(|(&x, &y)| (x, y))
        .unzip();

    if kept_x.is_empty() {
        return Err(DataError::EmptyAfterBounds { min, max });
    }
    Ok((kept_x, kept_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_vectors() {
        let err = VectorSource::new(vec![], vec![]).unwrap_err();
        assert!(matches!(
            err,
            DataError::Empty {
                param: "independent"
            }
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = VectorSource::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            DataError::LengthMismatch {
                independent: 2,
                dependent: 1
            }
        ));
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let err = VectorSource::new(vec![1.0, 3.0, 2.0], vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, DataError::NotIncreasing { index: 2 }));

        let err = VectorSource::new(vec![1.0, 1.0], vec![0.0; 2]).unwrap_err();
        assert!(matches!(err, DataError::NotIncreasing { index: 1 }));
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = VectorSource::new(vec![1.0, 2.0], vec![0.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            DataError::NonFinite {
                param: "dependent",
                index: 1
            }
        ));
    }

    #[test]
    fn test_bounds_filter_both_vectors() {
        let source = VectorSource::with_bounds(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![10.0, 20.0, 30.0, 40.0, 50.0],
            Some(2.0),
            Some(4.0),
        )
        .unwrap();
        assert_eq!(source.independent_values().unwrap(), &[2.0, 3.0, 4.0]);
        assert_eq!(source.dependent_values().unwrap(), &[20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_bounds_can_widen_again() {
        let mut source = VectorSource::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
        source.set_bounds(Some(3.0), None).unwrap();
        assert_eq!(source.len(), 1);
        source.set_bounds(None, None).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_failed_bounds_keep_previous_state() {
        let mut source = VectorSource::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
        source.set_bounds(Some(2.0), None).unwrap();

        let err = source.set_bounds(Some(5.0), Some(1.0)).unwrap_err();
        assert!(matches!(err, DataError::InvertedBounds { .. }));
        let err = source.set_bounds(Some(10.0), None).unwrap_err();
        assert!(matches!(err, DataError::EmptyAfterBounds { .. }));

        assert_eq!(source.bounds(), (Some(2.0), None));
        assert_eq!(source.independent_values().unwrap(), &[2.0, 3.0]);
    }
}
