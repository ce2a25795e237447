//! Feature Vector - model input row
//!
//! The classifier was trained on an `Age` column followed by a one-hot
//! encoding of the salary bucket. Column order and bucket edges below must
//! match the training pipeline exactly.

use serde::Serialize;

use crate::error::{PredictionError, PredictionResult};
use super::request::PredictionRequest;

/// Number of salary buckets
pub const BUCKET_COUNT: usize = 8;

/// Total number of model input columns (`Age` + one indicator per bucket)
pub const FEATURE_COUNT: usize = BUCKET_COUNT + 1;

/// Ascending bucket edges. Bucket `i` covers `(EDGES[i], EDGES[i + 1]]`.
pub const SALARY_EDGES: [f64; BUCKET_COUNT + 1] = [
    14999.999, 28000.0, 43000.0, 57000.0, 70000.0, 78000.0, 88000.0, 115125.0, 150000.0,
];

/// Column names in the order the model expects them
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Age", "0.0", "1.0", "2.0", "3.0", "4.0", "5.0", "6.0", "7.0",
];

/// One of the eight salary ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SalaryBucket(usize);

impl SalaryBucket {
    /// Find the bucket containing `salary`.
    ///
    /// Intervals are open on the left and closed on the right, so a salary
    /// equal to an edge belongs to the bucket below it. Anything at or below
    /// the first edge, above the last edge, or NaN has no bucket.
    pub fn for_salary(salary: f64) -> Option<Self> {
        SALARY_EDGES
            .windows(2)
            .position(|edge| salary > edge[0] && salary <= edge[1])
            .map(SalaryBucket)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Column name of this bucket's indicator, e.g. `"3.0"`
    pub fn column(self) -> &'static str {
        FEATURE_COLUMNS[self.0 + 1]
    }

    /// Salary range as `(lower_exclusive, upper_inclusive)`
    pub fn range(self) -> (f64, f64) {
        (SALARY_EDGES[self.0], SALARY_EDGES[self.0 + 1])
    }
}

/// Single model input row: age plus one-hot salary bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    pub age: i64,
    pub indicators: [u8; BUCKET_COUNT],
}

impl FeatureVector {
    /// Build the row for a validated request, rejecting out-of-range salaries
    pub fn from_request(request: &PredictionRequest) -> PredictionResult<Self> {
        let bucket = SalaryBucket::for_salary(request.salary)
            .ok_or(PredictionError::OutOfRange)?;
        Self::with_bucket(request.age, bucket)
    }

    pub fn with_bucket(age: i64, bucket: SalaryBucket) -> PredictionResult<Self> {
        let mut indicators = [0u8; BUCKET_COUNT];
        let slot = indicators
            .get_mut(bucket.index())
            .ok_or_else(|| PredictionError::FeatureAssignment(format!("{}.0", bucket.index())))?;
        *slot = 1;

        Ok(Self { age, indicators })
    }

    /// The bucket whose indicator is set
    pub fn bucket(&self) -> Option<SalaryBucket> {
        self.indicators.iter().position(|&v| v == 1).map(SalaryBucket)
    }

    /// Value of a column by name
    pub fn get(&self, column: &str) -> Option<i64> {
        let index = FEATURE_COLUMNS.iter().position(|c| *c == column)?;
        match index {
            0 => Some(self.age),
            i => Some(i64::from(self.indicators[i - 1])),
        }
    }

    /// Numeric row in `FEATURE_COLUMNS` order, as fed to the model
    pub fn to_row(&self) -> [f32; FEATURE_COUNT] {
        let mut row = [0.0f32; FEATURE_COUNT];
        row[0] = self.age as f32;
        for (slot, &flag) in row[1..].iter_mut().zip(self.indicators.iter()) {
            *slot = f32::from(flag);
        }
        row
    }

    /// Column name / value pairs for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_COLUMNS
            .iter()
            .filter_map(|c| self.get(c).map(|v| (c.to_string(), v.into())))
            .collect();
        serde_json::Value::Object(named)
    }
}
