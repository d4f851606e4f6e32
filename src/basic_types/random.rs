use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

use crate::marrow_assert_moderate;

/// Abstraction over a source of randomness, used by the random value selector.
///
/// An implementation backed by a fixed list of values is available for tests, which makes
/// test cases involving random selections deterministic.
pub trait Random: Debug {
    /// Generates a bool with probability `probability` of being true. It should hold that
    /// `probability ∈ [0, 1]`; this method will panic if this is not the case.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Generates a random usize sampled uniformly from `[range.start, range.end)`.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generates a random i32 sampled uniformly from `[lb, ub]`.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;
}

// Blanket implementation so any seedable rng (e.g. `SmallRng`) can be used where an
// implementation of `Random` is expected.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        marrow_assert_moderate!(
            (0.0..=1.0).contains(&probability),
            "it should hold that 0.0 <= {probability} <= 1.0"
        );

        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::ops::Range;

    use super::Random;
    use crate::marrow_assert_simple;

    /// A test "random" generator which takes a list of values of each requested type and returns
    /// them in order. Generating more values than were provided panics.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
        pub(crate) integers: Vec<i32>,
        pub(crate) bools: Vec<bool>,
    }

    impl Random for TestRandom {
        fn generate_bool(&mut self, _probability: f64) -> bool {
            self.bools.remove(0)
        }

        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            marrow_assert_simple!(
                range.contains(&selected),
                "the element selected by `TestRandom` ({selected}) is not in the provided range ({range:?})"
            );
            selected
        }

        fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
            let selected = self.integers.remove(0);
            marrow_assert_simple!(
                (lb..=ub).contains(&selected),
                "the element selected by `TestRandom` ({selected}) is not in the provided range ({lb}..={ub})"
            );
            selected
        }
    }
}
