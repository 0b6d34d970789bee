//! Regression test parameters and operations

use puncta_core::{BinaryVolume, Volume};

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "conncomp")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Record a boolean condition as a numbered check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Compare two binary volumes for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the volumes are identical, `false` otherwise.
    pub fn compare_binary(&mut self, a: &BinaryVolume, b: &BinaryVolume) -> bool {
        self.index += 1;

        if a.dims() != b.dims() {
            let msg = format!(
                "Failure in {}_reg: binary comparison for index {} - shape {} vs {}",
                self.test_name,
                self.index,
                a.dims(),
                b.dims()
            );
            return self.fail(msg);
        }

        if let Some(i) = a.data().iter().zip(b.data()).position(|(p, q)| p != q) {
            let (z, y, x) = a.dims().coords(i);
            let msg = format!(
                "Failure in {}_reg: binary comparison for index {} - voxel mismatch at ({}, {}, {})",
                self.test_name, self.index, z, y, x
            );
            return self.fail(msg);
        }

        true
    }

    /// Compare two intensity volumes for exact equality
    pub fn compare_volumes(&mut self, a: &Volume, b: &Volume) -> bool {
        self.index += 1;

        if !a.sizes_equal(b) {
            let msg = format!(
                "Failure in {}_reg: volume comparison for index {} - shape {} vs {}",
                self.test_name,
                self.index,
                a.dims(),
                b.dims()
            );
            return self.fail(msg);
        }

        if let Some(i) = a.data().iter().zip(b.data()).position(|(p, q)| p != q) {
            let (z, y, x) = a.dims().coords(i);
            let msg = format!(
                "Failure in {}_reg: volume comparison for index {} - sample mismatch at ({}, {}, {}): {} vs {}",
                self.test_name,
                self.index,
                z,
                y,
                x,
                a.data()[i],
                b.data()[i]
            );
            return self.fail(msg);
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test_compare");
        assert!(rp.compare_values(1.0, 1.0, 0.0));
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(!rp.compare_values(1.0, 2.0, 0.5));
        assert_eq!(rp.index(), 3);
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_nan_is_failure() {
        let mut rp = RegParams::new("test_nan");
        assert!(!rp.compare_values(1.0, f64::NAN, 10.0));
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_check() {
        let mut rp = RegParams::new("test_check");
        assert!(rp.check(true, "always"));
        assert!(!rp.check(false, "never"));
        assert!(rp.failures()[0].contains("never"));
    }
}
