#![forbid(unsafe_code)]

//! Stagger offsets for cascading reveals.

use std::time::Duration;

/// Start offsets for `count` items: item `i` starts at `i * step`.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration) -> Vec<Duration> {
    (0..count).map(|i| step.saturating_mul(i as u32)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS50: Duration = Duration::from_millis(50);

    #[test]
    fn empty_for_zero_items() {
        assert!(stagger_offsets(0, MS50).is_empty());
    }

    #[test]
    fn offsets_grow_by_step() {
        assert_eq!(
            stagger_offsets(4, MS50),
            vec![
                Duration::ZERO,
                Duration::from_millis(50),
                Duration::from_millis(100),
                Duration::from_millis(150),
            ]
        );
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let offsets = stagger_offsets(3, Duration::MAX);
        assert_eq!(offsets[2], Duration::MAX);
    }
}
