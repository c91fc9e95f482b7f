//! Seeded pseudo-random stream used to scatter the field.
//!
//! A 32-bit mixer in the mulberry family. A given seed always replays the
//! same sequence on every platform.

const INCREMENT: u32 = 0x6d2b_79f5;

/// Deterministic stream of values in `[0, 1]` (the upper end only through f32 rounding).
#[derive(Debug, Clone, Copy)]
pub struct SeededNoise {
    state: u32,
}

impl SeededNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.wrapping_add(INCREMENT),
        }
    }

    /// Seed for the item at `index` inside a container of the given size.
    ///
    /// Resizing the container reshuffles the scatter; the same size replays it.
    pub fn layout_seed(index: usize, width: f32, height: f32) -> u32 {
        let index = (index as u32).wrapping_add(1);
        index
            .wrapping_mul(1337)
            .wrapping_add((width.floor() as i64 as u32).wrapping_mul(7))
            .wrapping_add((height.floor() as i64 as u32).wrapping_mul(11))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let t = self.state;
        let mut x = (t ^ (t >> 15)).wrapping_mul(1 | t);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(61 | x));
        x ^ (x >> 14)
    }

    pub fn next_f32(&mut self) -> f32 {
        (f64::from(self.next_u32()) / 4_294_967_296.0) as f32
    }
}

impl Iterator for SeededNoise {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.next_f32())
    }
}
