//! Compensated (Neumaier) accumulation.
//!
//! The builder repeatedly does `scaled[l] += scaled[s] - 1`. With plain `f64`
//! the rounding error of every step lands in the next comparison against 1,
//! so long chains of donations can leave an entry a few ulps off. Carrying
//! the lost low-order bits separately keeps the running value exact to
//! roughly twice the working precision.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Compensated {
    sum: f64,
    carry: f64,
}

impl Compensated {
    /// Exact representation of `a * b` (up to underflow), via a fused multiply-add.
    #[inline]
    pub(crate) fn product(a: f64, b: f64) -> Self {
        let sum = a * b;
        let carry = a.mul_add(b, -sum);
        Self { sum, carry }
    }

    #[inline]
    pub(crate) fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.carry += (self.sum - t) + x;
        } else {
            self.carry += (x - t) + self.sum;
        }
        self.sum = t;
    }

    #[inline]
    pub(crate) fn value(&self) -> f64 {
        self.sum + self.carry
    }
}

impl FromIterator<f64> for Compensated {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Compensated::default();
        for x in iter {
            acc.add(x);
        }
        acc
    }
}
