//! Sequence generation and pad layout shuffling.

use super::{ButtonLayout, Symbol};
use crate::core::constants::ALPHABET_SIZE;
use rand::Rng;

/// Pick one symbol uniformly at random.
pub fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> Symbol {
    Symbol::ALL[rng.gen_range(0..ALPHABET_SIZE)]
}

/// Append one uniformly random symbol to the sequence.
///
/// The first symbol of a fresh game is the same operation on an empty
/// sequence. Length limits are the caller's concern.
pub fn append_symbol<R: Rng + ?Sized>(sequence: &mut Vec<Symbol>, rng: &mut R) {
    sequence.push(random_symbol(rng));
}

/// Shuffle which symbol appears at which pad position (Fisher-Yates).
pub fn shuffle_layout<R: Rng + ?Sized>(layout: &mut ButtonLayout, rng: &mut R) {
    for i in (1..layout.pads.len()).rev() {
        let j = rng.gen_range(0..=i);
        layout.pads.swap(i, j);
    }
}

/// A freshly shuffled layout.
pub fn shuffled_layout<R: Rng + ?Sized>(rng: &mut R) -> ButtonLayout {
    let mut layout = ButtonLayout::default();
    shuffle_layout(&mut layout, rng);
    layout
}
