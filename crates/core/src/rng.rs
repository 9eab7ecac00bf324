//! RNG module - color selection for spawns
//!
//! The rules never call a global random source. Instead they take a
//! [`ColorPicker`], so the engine can use a seeded [`SimpleRng`] and tests can
//! script exact piece sequences with [`SequencePicker`].

use crate::types::BlockColor;

/// Source of piece colors
pub trait ColorPicker {
    /// Pick one of `choices`; `choices` is never empty
    fn pick(&mut self, choices: &[BlockColor]) -> BlockColor;
}

/// Seeded linear congruential generator (Numerical Recipes constants)
///
/// Same seed, same color sequence. Seed 0 is remapped to 1.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Advance and return the raw state
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform value in `[0, max)`; 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Scale by the full word so the weak low bits never decide the result.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorPicker for SimpleRng {
    fn pick(&mut self, choices: &[BlockColor]) -> BlockColor {
        if choices.is_empty() {
            return BlockColor::Empty;
        }
        let idx = self.next_range(choices.len() as u32) as usize;
        choices[idx]
    }
}

/// Replays a fixed list of colors, cycling forever
///
/// Ignores `choices` unless the list is empty.
#[derive(Debug, Clone)]
pub struct SequencePicker {
    colors: Vec<BlockColor>,
    index: usize,
}

impl SequencePicker {
    pub fn new(colors: Vec<BlockColor>) -> Self {
        Self { colors, index: 0 }
    }

    /// Always the same color
    pub fn repeat(color: BlockColor) -> Self {
        Self::new(vec![color])
    }
}

impl ColorPicker for SequencePicker {
    fn pick(&mut self, choices: &[BlockColor]) -> BlockColor {
        if self.colors.is_empty() {
            return choices.first().copied().unwrap_or(BlockColor::Empty);
        }
        let color = self.colors[self.index % self.colors.len()];
        self.index = self.index.wrapping_add(1);
        color
    }
}

impl<P: ColorPicker + ?Sized> ColorPicker for Box<P> {
    fn pick(&mut self, choices: &[BlockColor]) -> BlockColor {
        (**self).pick(choices)
    }
}
