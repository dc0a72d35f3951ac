//! Ordinary least-squares trend line over an index axis

use crate::{MathError, Result};

/// `value = slope * index + intercept`, fitted over indices `0..n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    observations: usize,
}

impl LinearFit {
    /// Fit a line through `values`, using each value's position as `x`
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for linear regression".to_string(),
            ));
        }

        let n = values.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are identical".to_string(),
            ));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self {
            slope,
            intercept,
            observations: values.len(),
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Value of the line at an arbitrary index
    pub fn value_at(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }

    /// Extrapolate `steps_ahead` positions past the last fitted index (1 = next)
    pub fn extrapolate(&self, steps_ahead: usize) -> f64 {
        self.value_at((self.observations + steps_ahead - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_line() {
        let fit = LinearFit::fit(&[10.0, 12.0, 14.0, 16.0]).unwrap();

        assert_relative_eq!(fit.slope(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(fit.extrapolate(1), 18.0, epsilon = 1e-12);
        assert_relative_eq!(fit.extrapolate(3), 22.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noisy_fit() {
        let fit = LinearFit::fit(&[1.0, 3.0, 2.0, 4.0]).unwrap();

        // Sx=6 Sy=10 Sxy=19 Sxx=14, n=4
        assert_relative_eq!(fit.slope(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept(), 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point() {
        assert!(matches!(
            LinearFit::fit(&[1.0]),
            Err(MathError::InsufficientData(_))
        ));
    }
}
