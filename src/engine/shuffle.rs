use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

/// A uniformly random permutation of the question's options.
///
/// Questions call this once when they are built, so the display order stays
/// put across redraws.
pub fn shuffled_options(question: &Question) -> Vec<String> {
    shuffled_options_with(question, &mut rand::rng())
}

/// [`shuffled_options`] driven by a caller-supplied RNG.
pub fn shuffled_options_with<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Vec<String> {
    let mut options = question.options().to_vec();
    // Fisher-Yates
    options.as_mut_slice().shuffle(rng);
    options
}
