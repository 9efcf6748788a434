//! Example inputs for the "load example" action.

use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed example texts
pub const EXAMPLES: [&str; 5] = [
    "What is quantum computing?",
    "How does the internet work?",
    "Explain inflation in simple terms.",
    "What is blockchain technology?",
    "Why do planes fly?",
];

/// Pick an example at random
pub fn random_example() -> &'static str {
    random_example_with(&mut rand::thread_rng())
}

/// Pick an example with the given RNG
pub fn random_example_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EXAMPLES.choose(rng).copied().unwrap_or(EXAMPLES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_example_is_from_the_list() {
        for _ in 0..50 {
            assert!(EXAMPLES.contains(&random_example()));
        }
    }

    #[test]
    fn test_seeded_picks_cover_list() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_example_with(&mut rng));
        }
        assert_eq!(seen.len(), EXAMPLES.len());
    }
}
