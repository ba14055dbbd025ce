//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each of the seven kinds in shuffled order. Pieces are
//! drawn front to back; as soon as the last one is taken a freshly shuffled bag
//! replaces it, so no kind repeats before all seven have appeared.
//!
//! A small seeded LCG drives the shuffle so identical seeds replay identical
//! games.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next piece to draw; always < 7
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Take the front piece; refills with a new permutation once emptied.
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        if self.bag_index >= self.bag.len() {
            self.refill();
        }
        piece
    }

    /// The piece the next `draw` will return
    pub fn peek(&self) -> PieceKind {
        self.bag[self.bag_index]
    }

    /// Pieces left in the current bag, front first
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Current RNG state, usable as a seed for a follow-up game
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
