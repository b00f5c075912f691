//! Moving-average crossover flags.

/// Crossover flags for one row, each 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossFlags {
    /// Fast average crossed above the slow one on this row.
    pub up: u8,
    /// Fast average crossed below the slow one on this row.
    pub down: u8,
}

/// Computes crossover flags from aligned fast and slow averages.
///
/// A flag needs both averages defined on this row and the previous one;
/// anything else, including warm-up, is 0.
#[must_use]
pub fn crossovers(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<CrossFlags> {
    let len = fast.len().min(slow.len());
    (0..len)
        .map(|i| {
            if i == 0 {
                return CrossFlags::default();
            }
            match (fast[i], slow[i], fast[i - 1], slow[i - 1]) {
                (Some(f), Some(s), Some(pf), Some(ps)) => CrossFlags {
                    up: u8::from(f > s && pf <= ps),
                    down: u8::from(f < s && pf >= ps),
                },
                _ => CrossFlags::default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_up_and_down() {
        let fast = [Some(1.0), Some(2.0), Some(3.0), Some(1.0)];
        let slow = [Some(2.0), Some(2.0), Some(2.0), Some(2.0)];
        let flags = crossovers(&fast, &slow);

        assert_eq!(flags[0], CrossFlags::default());
        // equal is not above
        assert_eq!(flags[1], CrossFlags { up: 0, down: 0 });
        assert_eq!(flags[2], CrossFlags { up: 1, down: 0 });
        assert_eq!(flags[3], CrossFlags { up: 0, down: 1 });
    }

    #[test]
    fn test_touch_then_cross() {
        // touch at equality counts as the prior state for both directions
        let fast = [Some(2.0), Some(2.0), Some(1.5)];
        let slow = [Some(1.0), Some(2.0), Some(2.0)];
        let flags = crossovers(&fast, &slow);

        assert_eq!(flags[1], CrossFlags { up: 0, down: 0 });
        assert_eq!(flags[2], CrossFlags { up: 0, down: 1 });
    }

    #[test]
    fn test_warmup_is_zero() {
        let fast = [None, Some(3.0), Some(1.0)];
        let slow = [None, None, Some(2.0)];
        let flags = crossovers(&fast, &slow);
        assert!(flags.iter().all(|f| *f == CrossFlags::default()));
    }

    #[test]
    fn test_flags_mutually_exclusive() {
        let fast: Vec<_> = (0..50).map(|i| Some((f64::from(i) * 0.7).sin())).collect();
        let slow: Vec<_> = (0..50).map(|i| Some((f64::from(i) * 0.3).cos() * 0.5)).collect();
        let flags = crossovers(&fast, &slow);

        assert!(flags.iter().all(|f| f.up + f.down <= 1));
        assert!(flags.iter().any(|f| f.up == 1));
        assert!(flags.iter().any(|f| f.down == 1));
    }
}
