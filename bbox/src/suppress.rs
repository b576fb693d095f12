//! Greedy overlap suppression of detector candidates.
//!
//! The detector may report the same object several times with slightly
//! shifted boxes. [`suppress_overlapping`] walks the candidates in the order
//! they were reported and keeps a candidate only if its overlap ratio (see
//! [`RectRatio::overlap_ratio_with`]) with every box kept so far is at most
//! the threshold.
//!
//! The first candidate of an overlapping cluster always wins. This is not a
//! clustering NMS: a later candidate is dropped as soon as it overlaps any
//! kept box, regardless of how it relates to other dropped candidates, and
//! candidates are never re-ranked by confidence.

use crate::{common::*, Rect, RectRatio};

/// The overlap ratio above which a candidate is treated as a duplicate.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.3;

/// Overlap suppression with a validated threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapSuppressor {
    threshold: f64,
}

impl OverlapSuppressor {
    /// Create a suppressor. The threshold must lie in the open range (0, 1).
    pub fn new(threshold: f64) -> Result<Self> {
        ensure!(
            threshold > 0.0 && threshold < 1.0,
            "overlap threshold must be in range (0, 1), but get {}",
            threshold
        );
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn suppress<R, I>(&self, candidates: I) -> Vec<R>
    where
        I: IntoIterator<Item = R>,
        R: Rect,
        R::Type: Copy + Num + PartialOrd + Into<f64>,
    {
        suppress_overlapping(candidates, self.threshold)
    }
}

impl Default for OverlapSuppressor {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

/// Keep the candidates that do not overlap an earlier kept candidate by more
/// than `threshold`, preserving their order.
///
/// The comparison is strict: a ratio exactly equal to `threshold` is kept.
/// Zero-area candidates have a zero overlap ratio with everything, so they
/// are always kept and never suppress anything.
pub fn suppress_overlapping<R, I>(candidates: I, threshold: f64) -> Vec<R>
where
    I: IntoIterator<Item = R>,
    R: Rect,
    R::Type: Copy + Num + PartialOrd + Into<f64>,
{
    candidates
        .into_iter()
        .fold(vec![], |mut accepted: Vec<R>, candidate| {
            let overlapping = accepted
                .iter()
                .any(|kept| candidate.overlap_ratio_with(kept) > threshold);

            if !overlapping {
                accepted.push(candidate);
            }
            accepted
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RectNum, TLBR, XYWH};
    use rand::{prelude::*, rngs::StdRng};

    fn xywh(x: i32, y: i32, w: i32, h: i32) -> XYWH<i32> {
        XYWH::from_xywh([x, y, w, h])
    }

    fn random_boxes(rng: &mut StdRng, count: usize) -> Vec<XYWH<i32>> {
        (0..count)
            .map(|_| {
                xywh(
                    rng.gen_range(0..400),
                    rng.gen_range(0..400),
                    rng.gen_range(0..120),
                    rng.gen_range(0..120),
                )
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        let output: Vec<XYWH<i32>> = suppress_overlapping(vec![], 0.3);
        assert!(output.is_empty());
    }

    #[test]
    fn disjoint_boxes_are_kept() {
        let input = vec![
            xywh(0, 0, 10, 10),
            xywh(20, 0, 10, 10),
            xywh(0, 20, 10, 10),
            xywh(10, 10, 10, 10),
        ];
        assert_eq!(suppress_overlapping(input.clone(), 0.3), input);
    }

    #[test]
    fn exact_duplicate_is_dropped() {
        let rect = xywh(7, 9, 31, 17);
        for threshold in [0.01, 0.3, 0.5, 0.99] {
            assert_eq!(suppress_overlapping(vec![rect, rect], threshold), vec![rect]);
        }
    }

    #[test]
    fn first_seen_wins() {
        let a = xywh(0, 0, 100, 100);
        let b = xywh(20, 20, 100, 100);

        assert_eq!(suppress_overlapping(vec![a, b], 0.3), vec![a]);
        assert_eq!(suppress_overlapping(vec![b, a], 0.3), vec![b]);
    }

    #[test]
    fn threshold_is_exclusive() {
        // intersection 30, smaller area 100
        let a = xywh(0, 0, 10, 10);
        let b = xywh(7, 0, 10, 10);
        assert_eq!(a.overlap_ratio_with(&b), 0.3);
        assert_eq!(suppress_overlapping(vec![a, b], 0.3), vec![a, b]);

        // intersection 31, smaller area 100
        let c = xywh(0, 0, 100, 1);
        let d = xywh(69, 0, 100, 1);
        assert_eq!(suppress_overlapping(vec![c, d], 0.3), vec![c]);
    }

    #[test]
    fn only_kept_boxes_suppress() {
        // b overlaps a, c overlaps b but not a: c survives because b was dropped
        let a = xywh(0, 0, 100, 100);
        let b = xywh(50, 0, 100, 100);
        let c = xywh(110, 0, 100, 100);

        assert_eq!(suppress_overlapping(vec![a, b, c], 0.3), vec![a, c]);
    }

    #[test]
    fn scenario_with_two_faces() {
        let input = vec![
            xywh(0, 0, 100, 100),
            xywh(10, 10, 100, 100),
            xywh(500, 500, 50, 50),
        ];
        let output = OverlapSuppressor::default().suppress(input);
        assert_eq!(output, vec![xywh(0, 0, 100, 100), xywh(500, 500, 50, 50)]);
    }

    #[test]
    fn zero_area_boxes_are_kept() {
        let face = xywh(0, 0, 50, 50);
        let line = xywh(10, 10, 0, 30);
        let point = xywh(10, 10, 0, 0);

        let output = suppress_overlapping(vec![line, face, point, line, face], 0.3);
        assert_eq!(output, vec![line, face, point, line]);
    }

    #[test]
    fn clamped_boxes_are_degenerate() {
        let face = xywh(0, 0, 50, 50);
        let broken = XYWH::<i32>::from_xywh_clamped([5, 5, -40, 40]);

        let output = suppress_overlapping(vec![face, broken], 0.3);
        assert_eq!(output, vec![face, broken]);
    }

    #[test]
    fn works_with_float_tlbr() {
        let a = TLBR::<f64>::from_tlbr([0.0, 0.0, 1.0, 1.0]);
        let b = TLBR::<f64>::from_tlbr([0.5, 0.5, 1.5, 1.5]);
        let c = TLBR::<f64>::from_tlbr([0.0, 2.0, 1.0, 3.0]);

        let output = suppress_overlapping(vec![a, b, c], 0.2);
        assert_eq!(output, vec![a, c]);
    }

    #[test]
    fn threshold_validation() {
        assert!(OverlapSuppressor::new(0.3).is_ok());
        assert!(OverlapSuppressor::new(0.0).is_err());
        assert!(OverlapSuppressor::new(1.0).is_err());
        assert!(OverlapSuppressor::new(-0.5).is_err());
        assert!(OverlapSuppressor::new(f64::NAN).is_err());
        assert_eq!(
            OverlapSuppressor::default().threshold(),
            DEFAULT_OVERLAP_THRESHOLD
        );
    }

    #[test]
    fn random_output_invariants() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let count = rng.gen_range(0..30);
            let input = random_boxes(&mut rng, count);
            let threshold = rng.gen_range(0.05..0.95);
            let output = suppress_overlapping(input.clone(), threshold);

            // idempotent
            assert_eq!(suppress_overlapping(output.clone(), threshold), output);

            // ordered subsequence of the input
            let mut remaining = input.iter();
            assert!(output
                .iter()
                .all(|kept| remaining.any(|candidate| candidate == kept)));

            // no kept pair above threshold
            for (i, lhs) in output.iter().enumerate() {
                for rhs in &output[i + 1..] {
                    assert!(lhs.overlap_ratio_with(rhs) <= threshold);
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let mut rng = StdRng::seed_from_u64(11);
        let input = random_boxes(&mut rng, 50);

        let first = suppress_overlapping(input.clone(), 0.3);
        let second = suppress_overlapping(input, 0.3);
        assert_eq!(first, second);
    }
}
