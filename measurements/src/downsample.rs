//! Largest-Triangle-Three-Buckets downsampling.
//!
//! Reduces an ordered series to a target point count while keeping its
//! visual shape: the first and last points always survive, and each
//! interior bucket contributes the point spanning the largest triangle
//! against its neighbours.
//!
//! This implementation deviates from textbook LTTB in one deliberate way:
//! the right anchor of the triangle is not the average of the next bucket
//! but the most recently *selected* point, updated whenever a candidate
//! takes the lead inside the current bucket. The divergence is visible in
//! the output, and downstream charts were built against it, so it is kept
//! as-is rather than corrected.

use thiserror::Error;

/// Errors for downsampling input that cannot be worked with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownsampleError {
    /// The requested output size cannot hold both endpoints.
    #[error("threshold must be at least 2, got {0}")]
    Threshold(usize),

    /// A point's time coordinate could not be interpreted.
    #[error("point {0} has no usable time coordinate")]
    BadPoint(usize),
}

/// A point the downsampler can position on a chart.
pub trait SeriesPoint {
    /// Numeric time coordinate. `None` when the point's timestamp cannot
    /// be interpreted, which aborts the whole downsample run.
    fn time_coord(&self) -> Option<f64>;

    /// Numeric value coordinate.
    fn value_coord(&self) -> f64;
}

/// Downsamples `points` to at most `threshold` points.
///
/// Input is assumed ordered by time. When the input already fits the
/// threshold it is returned unchanged. Otherwise the result holds exactly
/// `threshold` points, starting with `points[0]` and ending with the last
/// input point. Selected points appear in input order, but callers that
/// need a hard ordering guarantee re-sort the result.
///
/// # Errors
///
/// Fails for `threshold < 2` and for points without a usable time
/// coordinate. Nothing partial is ever returned.
pub fn downsample<P>(points: &[P], threshold: usize) -> Result<Vec<P>, DownsampleError>
where
    P: SeriesPoint + Clone,
{
    if threshold < 2 {
        return Err(DownsampleError::Threshold(threshold));
    }
    if points.len() <= threshold {
        return Ok(points.to_vec());
    }

    let n = points.len();
    if threshold == 2 {
        // No interior buckets, only the endpoints survive.
        return Ok(vec![points[0].clone(), points[n - 1].clone()]);
    }

    // Coordinates are computed once up front; a single bad point fails the
    // whole run rather than skewing the selection.
    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.time_coord()
                .map(|t| (t, p.value_coord()))
                .ok_or(DownsampleError::BadPoint(i))
        })
        .collect::<Result<_, _>>()?;

    let interior = n - 2;
    let buckets = threshold - 2;

    let mut sampled: Vec<usize> = Vec::with_capacity(threshold);
    sampled.push(0);

    // Index of the most recently selected point, serving as the right
    // anchor of the area computation. Starts at the first point and moves
    // every time a candidate takes the lead.
    let mut reference = 0usize;

    for bucket in 0..buckets {
        // Interior points are partitioned exactly across the buckets, so
        // every bucket holds at least one candidate and the output size is
        // exactly the threshold.
        let range_start = 1 + bucket * interior / buckets;
        let range_end = 1 + (bucket + 1) * interior / buckets;

        let a = coords[*sampled.last().expect("first point is always sampled")];
        let mut max_area = -1.0f64;
        let mut selected = range_start;

        for candidate in range_start..range_end {
            let b = coords[candidate];
            let r = coords[reference];
            let area = ((a.0 - b.0) * (r.1 - b.1) - (a.1 - b.1) * (r.0 - b.0)).abs() / 2.0;

            // Strictly-largest wins, so ties keep the first-seen candidate.
            if area > max_area {
                max_area = area;
                selected = candidate;
                reference = candidate;
            }
        }

        sampled.push(selected);
    }

    sampled.push(n - 1);
    Ok(sampled.into_iter().map(|i| points[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal point type for exercising the algorithm.
    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        t: f64,
        v: f64,
    }

    impl SeriesPoint for Point {
        fn time_coord(&self) -> Option<f64> {
            if self.t.is_nan() {
                None
            } else {
                Some(self.t)
            }
        }

        fn value_coord(&self) -> f64 {
            self.v
        }
    }

    fn series(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point {
                t: i as f64,
                v: ((i * 31) % 17) as f64,
            })
            .collect()
    }

    #[test]
    fn should_return_input_unchanged_when_within_threshold() {
        // given
        let points = series(10);

        // when
        let result = downsample(&points, 10).unwrap();

        // then
        assert_eq!(result, points);
    }

    #[test]
    fn should_return_input_unchanged_when_below_threshold() {
        // given
        let points = series(3);

        // when
        let result = downsample(&points, 500).unwrap();

        // then
        assert_eq!(result, points);
    }

    #[test]
    fn should_return_exactly_threshold_points() {
        // given
        let points = series(1000);

        // when
        let result = downsample(&points, 500).unwrap();

        // then
        assert_eq!(result.len(), 500);
    }

    #[test]
    fn should_return_exact_count_for_awkward_bucket_ratios() {
        // given - sizes chosen so the interior does not divide evenly
        for (n, threshold) in [(11, 5), (100, 7), (1000, 499), (503, 500)] {
            let points = series(n);

            // when
            let result = downsample(&points, threshold).unwrap();

            // then
            assert_eq!(result.len(), threshold, "n={}, threshold={}", n, threshold);
        }
    }

    #[test]
    fn should_preserve_first_and_last_points() {
        // given
        let points = series(250);

        // when
        let result = downsample(&points, 20).unwrap();

        // then
        assert_eq!(result[0], points[0]);
        assert_eq!(result[result.len() - 1], points[points.len() - 1]);
    }

    #[test]
    fn should_emit_points_in_input_order() {
        // given
        let points = series(300);

        // when
        let result = downsample(&points, 50).unwrap();

        // then - selected indices advance bucket by bucket
        for pair in result.windows(2) {
            assert!(pair[0].t < pair[1].t);
        }
    }

    #[test]
    fn should_select_points_from_the_input() {
        // given
        let points = series(100);

        // when
        let result = downsample(&points, 10).unwrap();

        // then
        for p in &result {
            assert!(points.contains(p));
        }
    }

    #[test]
    fn should_return_endpoints_for_threshold_of_two() {
        // given
        let points = series(50);

        // when
        let result = downsample(&points, 2).unwrap();

        // then
        assert_eq!(result, vec![points[0].clone(), points[49].clone()]);
    }

    #[test]
    fn should_reject_threshold_below_two() {
        // given
        let points = series(50);

        // when/then
        assert_eq!(
            downsample(&points, 1).unwrap_err(),
            DownsampleError::Threshold(1)
        );
        assert_eq!(
            downsample(&points, 0).unwrap_err(),
            DownsampleError::Threshold(0)
        );
    }

    #[test]
    fn should_fail_on_point_without_time_coordinate() {
        // given
        let mut points = series(50);
        points[25].t = f64::NAN;

        // when/then
        assert_eq!(
            downsample(&points, 10).unwrap_err(),
            DownsampleError::BadPoint(25)
        );
    }

    #[test]
    fn should_not_inspect_coordinates_under_short_circuit() {
        // given - a bad point is tolerated when no downsampling happens
        let mut points = series(10);
        points[5].t = f64::NAN;

        // when
        let result = downsample(&points, 10).unwrap();

        // then
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn should_be_idempotent_once_within_threshold() {
        // given
        let points = series(400);
        let once = downsample(&points, 50).unwrap();

        // when - the second pass short-circuits
        let twice = downsample(&once, 50).unwrap();

        // then
        assert_eq!(twice, once);
    }

    #[test]
    fn should_keep_first_seen_candidate_on_area_ties() {
        // given - a flat series makes every candidate area equal
        let points: Vec<Point> = (0..30).map(|i| Point { t: i as f64, v: 5.0 }).collect();

        // when
        let result = downsample(&points, 5).unwrap();

        // then - each bucket's first candidate wins; buckets hold
        // indices 1..10, 10..19, 19..28
        let times: Vec<f64> = result.iter().map(|p| p.t).collect();
        assert_eq!(times, vec![0.0, 1.0, 10.0, 19.0, 29.0]);
    }
}
