//! Cumulative-slice roulette wheel and range sampling.
//!
//! Both populations select through the same wheel layout: slices are laid
//! end to end with a fixed gap of [`SLICE_GAP`] between them, and a single
//! integer in `[0, 100)` is drawn. A slice only matches a draw that lies
//! strictly inside it, so draws that land on a boundary or in a gap, or past
//! the last slice, select nothing and the caller spins again.
//!
//! Weights are used as raw slice widths, not normalized. Slices extending
//! past 100 are unreachable beyond that point.

use crate::error::ViralError;
use rand::Rng;

/// Offset between the end of one slice and the start of the next.
pub const SLICE_GAP: f64 = 0.1;

/// Draws are integers in `0..WHEEL_SPAN`.
pub const WHEEL_SPAN: u32 = 100;

/// Maximum draws tried by [`random_range`] before giving up.
pub const MAX_RANGE_ATTEMPTS: usize = 1_000_000;

/// One interval of the wheel, matched with exclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
}

impl Slice {
    pub fn contains(&self, value: f64) -> bool {
        value > self.start && value < self.end
    }
}

/// Slices laid out from a sequence of weights.
#[derive(Debug, Clone, Default)]
pub struct RouletteWheel {
    slices: Vec<Slice>,
}

impl RouletteWheel {
    /// Lays out one slice per weight, in order.
    ///
    /// The first slice is `(0, w0)`; every following slice starts
    /// [`SLICE_GAP`] after the previous end and is `w` wide.
    pub fn from_weights<I: IntoIterator<Item = f64>>(weights: I) -> Self {
        let mut slices = Vec::new();
        let mut end = 0.0;
        for (i, w) in weights.into_iter().enumerate() {
            let start = if i == 0 { 0.0 } else { end + SLICE_GAP };
            end = start + w;
            slices.push(Slice { start, end });
        }
        Self { slices }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Index of the first slice strictly containing `value`.
    pub fn pick(&self, value: f64) -> Option<usize> {
        self.slices.iter().position(|s| s.contains(value))
    }

    /// Draws once. `None` when the draw lands on no slice.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.slices.is_empty() {
            return None;
        }
        let draw = rng.random_range(0..WHEEL_SPAN);
        self.pick(f64::from(draw))
    }

    /// Spins until a slice matches, at most `max_spins` times.
    pub fn spin_until_hit<R: Rng>(&self, rng: &mut R, max_spins: usize) -> Option<usize> {
        (0..max_spins).find_map(|_| self.spin(rng))
    }
}

/// Draws a half-open index range `[lo, hi)` of exactly `length` within a
/// route of `route_len` entries.
///
/// Rejection sampling: two uniform indices in `[0, route_len)` are drawn
/// until their distance equals `length`. Fails immediately if no such pair
/// exists (`length` outside `(0, route_len)`), and after
/// [`MAX_RANGE_ATTEMPTS`] draws otherwise.
pub fn random_range<R: Rng>(
    route_len: usize,
    length: usize,
    rng: &mut R,
) -> Result<(usize, usize), ViralError> {
    if length == 0 || length >= route_len {
        return Err(ViralError::DegenerateRange {
            length,
            route_len,
            attempts: 0,
        });
    }

    for _ in 0..MAX_RANGE_ATTEMPTS {
        let a = rng.random_range(0..route_len);
        let b = rng.random_range(0..route_len);
        if a == b {
            continue;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if hi - lo == length {
            return Ok((lo, hi));
        }
    }

    Err(ViralError::DegenerateRange {
        length,
        route_len,
        attempts: MAX_RANGE_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_slice_layout_with_gap() {
        let wheel = RouletteWheel::from_weights([5.0, 5.0, 2.0]);
        let s = wheel.slices();
        assert_eq!(s[0], Slice { start: 0.0, end: 5.0 });
        assert!((s[1].start - 5.1).abs() < 1e-12);
        assert!((s[1].end - 10.1).abs() < 1e-12);
        assert!((s[2].start - 10.2).abs() < 1e-12);
        assert!((s[2].end - 12.2).abs() < 1e-12);
    }

    #[test]
    fn test_boundaries_match_nothing() {
        let wheel = RouletteWheel::from_weights([5.0, 5.0]);
        assert_eq!(wheel.pick(0.0), None);
        assert_eq!(wheel.pick(5.0), None);
        assert_eq!(wheel.pick(3.0), Some(0));
        assert_eq!(wheel.pick(6.0), Some(1));
        assert_eq!(wheel.pick(11.0), None);
    }

    #[test]
    fn test_single_slice_always_wins() {
        let wheel = RouletteWheel::from_weights([5.0]);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            assert_eq!(wheel.spin_until_hit(&mut rng, 10_000), Some(0));
        }
    }

    #[test]
    fn test_unit_slice_unreachable() {
        // (0, 1) holds no integer.
        let wheel = RouletteWheel::from_weights([1.0]);
        let mut rng = create_rng(42);
        assert_eq!(wheel.spin_until_hit(&mut rng, 500), None);
    }

    #[test]
    fn test_empty_wheel() {
        let wheel = RouletteWheel::from_weights(std::iter::empty());
        let mut rng = create_rng(42);
        assert!(wheel.is_empty());
        assert_eq!(wheel.spin(&mut rng), None);
    }

    #[test]
    fn test_wide_first_slice_dominates() {
        let wheel = RouletteWheel::from_weights([250.0, 10.0]);
        let mut rng = create_rng(7);
        for _ in 0..100 {
            assert_eq!(wheel.spin_until_hit(&mut rng, 100), Some(0));
        }
    }

    #[test]
    fn test_random_range_exact_length() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (lo, hi) = random_range(10, 3, &mut rng).unwrap();
            assert_eq!(hi - lo, 3);
            assert!(hi < 10);
        }
    }

    #[test]
    fn test_random_range_degenerate() {
        let mut rng = create_rng(42);
        assert!(matches!(
            random_range(5, 0, &mut rng),
            Err(ViralError::DegenerateRange { attempts: 0, .. })
        ));
        assert!(matches!(
            random_range(5, 5, &mut rng),
            Err(ViralError::DegenerateRange { attempts: 0, .. })
        ));
        assert!(random_range(5, 4, &mut rng).is_ok());
    }
}
