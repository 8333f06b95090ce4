use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static TABLE: OnceLock<PrecisionTable> = OnceLock::new();
static CONSTRUCTED: AtomicBool = AtomicBool::new(false);

/// Scaling constants shared by every encode/decode call of the process.
///
/// `positive[i]` holds `10^(2^i)` and `negative[i]` its reciprocal, for every `i` for which
/// the power is still a finite `f64`. Any power of ten inside the representable range can
/// then be assembled from at most `positive.len()` multiplications.
///
/// The table also records the decimal form of the largest native unsigned value, which the
/// integer decoder uses to detect overflow before it accumulates a single digit.
#[derive(Debug)]
pub struct PrecisionTable {
    positive: Vec<f64>,
    negative: Vec<f64>,
    max_unsigned_digits: Vec<u8>,
}

impl PrecisionTable {
    /// Returns the process-wide table, building it on first use.
    ///
    /// Concurrent first calls are serialized by the underlying `OnceLock`; only one of them
    /// runs the construction.
    pub fn get() -> &'static PrecisionTable {
        TABLE.get_or_init(PrecisionTable::build)
    }

    fn build() -> PrecisionTable {
        assert!(
            !CONSTRUCTED.swap(true, Ordering::SeqCst),
            "precision table constructed twice"
        );

        let mut positive = vec![10.0f64];
        loop {
            let last = positive[positive.len() - 1];
            let next = last * last;
            if !next.is_finite() {
                break;
            }
            positive.push(next);
        }
        let negative = positive.iter().map(|value| 1.0 / value).collect();

        let table = PrecisionTable {
            positive,
            negative,
            max_unsigned_digits: u64::MAX.to_string().into_bytes(),
        };
        log::debug!(
            "Precision table initialized (max exponent = {}, max unsigned digits = {})",
            table.max_exponent(),
            table.max_digits()
        );
        table
    }

    /// Largest `n` such that `10^(2^n)` is representable.
    pub fn max_exponent(&self) -> usize {
        self.positive.len() - 1
    }

    /// Largest decimal exponent that can be assembled from the table.
    pub fn max_power(&self) -> u32 {
        (1u32 << self.positive.len()) - 1
    }

    /// Number of decimal digits of the largest native unsigned value.
    pub fn max_digits(&self) -> usize {
        self.max_unsigned_digits.len()
    }

    /// Decimal digits of the largest native unsigned value.
    pub fn max_value_digits(&self) -> &[u8] {
        &self.max_unsigned_digits
    }

    pub fn positive_powers(&self) -> &[f64] {
        &self.positive
    }

    pub fn negative_powers(&self) -> &[f64] {
        &self.negative
    }

    /// Computes `10^exponent` by binary decomposition of the exponent.
    /// Returns infinity when the power is not representable.
    pub fn power_of_ten(&self, exponent: u32) -> f64 {
        if exponent > self.max_power() {
            return f64::INFINITY;
        }
        let mut result = 1.0;
        for (bit, power) in self.positive.iter().enumerate() {
            if exponent & (1 << bit) != 0 {
                result *= power;
            }
        }
        result
    }

    /// Computes `value * 10^exponent`.
    ///
    /// Negative exponents divide by an exact power when one exists, which keeps the result
    /// correctly rounded. Below the range of finite powers the reciprocal table is used, step
    /// by step, so tiny values degrade into subnormals instead of collapsing to zero at once.
    pub fn scale(&self, value: f64, exponent: i32) -> f64 {
        if value == 0.0 || exponent == 0 {
            return value;
        }
        let magnitude = exponent.unsigned_abs();
        if exponent > 0 {
            return value * self.power_of_ten(magnitude);
        }

        let power = self.power_of_ten(magnitude);
        if power.is_finite() {
            return value / power;
        }
        if magnitude > self.max_power() {
            return 0.0f64.copysign(value);
        }
        let mut result = value;
        for (bit, reciprocal) in self.negative.iter().enumerate().rev() {
            if magnitude & (1 << bit) != 0 {
                result *= reciprocal;
            }
        }
        result
    }
}
