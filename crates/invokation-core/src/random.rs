//! Injected randomness.
//!
//! Effects that need randomness receive a [`RandomSource`] explicitly; there
//! is no ambient RNG. Any [`rand::RngCore`] is a source, so hosts normally
//! pass a seeded [`rand_chacha::ChaCha8Rng`] and replays stay bit-identical.
//!
//! # Example
//!
//! ```
//! use invokation_core::random::RandomSource;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut a = ChaCha8Rng::seed_from_u64(7);
//! let mut b = ChaCha8Rng::seed_from_u64(7);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, RngCore};

use crate::element::Element;

/// A source of dice faces.
pub trait RandomSource {
    /// Rolls one die: one of the seven pure elements or `Omni`, uniformly.
    fn roll_die(&mut self) -> Element;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn roll_die(&mut self) -> Element {
        let face = self.gen_range(0..=Element::PURE.len());
        Element::PURE.get(face).copied().unwrap_or(Element::Omni)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_faces() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let faces_a: Vec<Element> = (0..32).map(|_| a.roll_die()).collect();
        let faces_b: Vec<Element> = (0..32).map(|_| b.roll_die()).collect();
        assert_eq!(faces_a, faces_b);
    }

    #[test]
    fn faces_are_rollable_elements() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..256 {
            let face = rng.roll_die();
            assert!(face == Element::Omni || Element::PURE.contains(&face));
        }
    }

    #[test]
    fn works_through_trait_object() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let source: &mut dyn RandomSource = &mut rng;
        let _ = source.roll_die();
    }
}
