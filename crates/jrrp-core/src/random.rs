use rand::Rng;

/// Uniform random source used for candidate ordering.
///
/// Kept as a trait so tests can script the exact sequence of draws.
pub trait RandomSource: Send {
    /// Uniform value in `0..upper`. `upper` is always at least 1.
    fn below(&mut self, upper: usize) -> usize;
}

/// Adapter for any `rand` generator.
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn below(&mut self, upper: usize) -> usize {
        self.0.random_range(0..upper)
    }
}

/// Production source seeded from the OS.
pub fn os_seeded() -> RngSource<rand::rngs::StdRng> {
    use rand::SeedableRng;
    RngSource(rand::rngs::StdRng::from_os_rng())
}

/// Fisher-Yates shuffle: draws `below(i + 1)` for `i` from `len - 1` down to 1.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
