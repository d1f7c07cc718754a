use crate::geometry::KEY_COUNT;
use fastrand::Rng;

/// Draws two slots uniformly from the grid. `None` when both draws hit the same slot.
#[inline(always)]
pub fn draw_swap(rng: &mut Rng) -> Option<(usize, usize)> {
    let idx_a = rng.usize(0..KEY_COUNT);
    let idx_b = rng.usize(0..KEY_COUNT);
    if idx_a == idx_b {
        None
    } else {
        Some((idx_a, idx_b))
    }
}

pub fn build_rng(seed: Option<u64>) -> Rng {
    match seed {
        Some(s) => Rng::with_seed(s),
        None => Rng::new(),
    }
}
