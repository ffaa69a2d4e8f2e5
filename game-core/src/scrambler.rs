use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Shuffles before falling back to a rotation.
const MAX_SHUFFLE_ATTEMPTS: usize = 32;

pub struct WordScrambler;

impl WordScrambler {
    /// Scramble a word so the result differs from the input whenever any
    /// differing permutation exists.
    pub fn scramble(word: &str) -> String {
        Self::scramble_with(word, &mut rand::thread_rng())
    }

    pub fn scramble_with<R: Rng>(word: &str, rng: &mut R) -> String {
        let mut chars: Vec<char> = word.chars().collect();

        // Zero or one distinct character: every permutation is the word itself
        let distinct: HashSet<&char> = chars.iter().collect();
        if distinct.len() <= 1 {
            return word.to_string();
        }

        for _ in 0..MAX_SHUFFLE_ATTEMPTS {
            chars.shuffle(rng);
            let candidate: String = chars.iter().collect();
            if candidate != word {
                return candidate;
            }
        }

        Self::rotate_until_different(word)
    }

    /// Deterministic fallback: rotate left until the string changes. Any word
    /// with two distinct characters has at least one differing rotation.
    fn rotate_until_different(word: &str) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        for _ in 1..chars.len() {
            chars.rotate_left(1);
            let candidate: String = chars.iter().collect();
            if candidate != word {
                return candidate;
            }
        }
        word.to_string()
    }
}
