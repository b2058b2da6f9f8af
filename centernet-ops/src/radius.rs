//! Overlap-preserving Gaussian radius of a ground-truth box.

use crate::common::*;

/// The root formula used when solving the radius quadratics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusMode {
    /// Computes `(-b + sqrt(b^2 - 4ac)) / 2`, the larger root scaled by `a`.
    ///
    /// This is not the textbook root since the division by `a` is missing.
    /// It is the default mode.
    Legacy,
    /// Computes the smallest non-negative root `(-b ± sqrt(b^2 - 4ac)) / 2a`.
    Corrected,
}

impl Default for RadiusMode {
    fn default() -> Self {
        Self::Legacy
    }
}

/// Solves `a x^2 + b x + c = 0` according to `mode`.
///
/// A negative discriminant yields NaN. Nothing is clamped.
pub fn smallest_positive_root<T>(a: T, b: T, c: T, mode: RadiusMode) -> T
where
    T: Float,
{
    let two = T::one() + T::one();
    let four = two + two;
    let discriminant = (b * b - four * a * c).sqrt();

    match mode {
        RadiusMode::Legacy => (-b + discriminant) / two,
        RadiusMode::Corrected => {
            let root1 = (-b - discriminant) / (two * a);
            let root2 = (-b + discriminant) / (two * a);
            if root1 < T::zero() {
                root2
            } else {
                root1
            }
        }
    }
}

/// Returns a lower bound on how far the corners of a detection may move away
/// from a `[height, width]` ground-truth box while the two boxes still reach
/// `min_overlap` IoU.
///
/// Inputs are not validated. Non-positive sizes or `min_overlap` outside
/// `(0, 1]` produce NaN or negative radii.
pub fn gaussian_radius<T>(det_size: [T; 2], min_overlap: T, mode: RadiusMode) -> T
where
    T: Float,
{
    let [height, width] = det_size;
    let one = T::one();
    let two = one + one;
    let four = two + two;
    let m = min_overlap;

    // The boxes overlap partially and neither contains the other.
    let r1 = smallest_positive_root(
        one,
        -(height + width),
        width * height * (one - m) / (one + m),
        mode,
    );

    // The detection lies inside the ground truth.
    let r2 = smallest_positive_root(
        four,
        -two * (height + width),
        (one - m) * width * height,
        mode,
    );

    // The ground truth lies inside the detection.
    let r3 = smallest_positive_root(
        four * m,
        two * m * (height + width),
        (m - one) * width * height,
        mode,
    );

    nan_min(nan_min(r1, r2), r3)
}

/// Applies [gaussian_radius] to every `[height, width]` pair along the last axis.
///
/// The output drops the last axis, so a `(N, 2)` input yields `N` radii.
pub fn gaussian_radius_batch<T, S, D>(
    det_sizes: &ArrayBase<S, D>,
    min_overlap: T,
    mode: RadiusMode,
) -> Result<Array<T, D::Smaller>>
where
    T: Float,
    S: Data<Elem = T>,
    D: RemoveAxis,
{
    let shape = det_sizes.shape();
    ensure!(
        shape.last() == Some(&2),
        "invalid shape: expect the last dimension to be 2, but get {:?}",
        shape
    );
    let last_axis = Axis(shape.len() - 1);

    let radii = det_sizes.map_axis(last_axis, |hw| {
        gaussian_radius([hw[0], hw[1]], min_overlap, mode)
    });
    Ok(radii)
}

// f32::min() drops NaN, while the radius must keep it.
fn nan_min<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    if lhs.is_nan() || rhs.is_nan() {
        T::nan()
    } else {
        lhs.min(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn legacy_radius_golden_value() {
        let radius = gaussian_radius([10.0, 10.0], 0.7, RadiusMode::Legacy);
        assert_abs_diff_eq!(radius, 2.7332005306815113, epsilon = 1e-12);
    }

    #[test]
    fn corrected_radius_golden_value() {
        let radius = gaussian_radius([10.0, 10.0], 0.7, RadiusMode::Corrected);
        assert_abs_diff_eq!(radius, 0.8166998673296222, epsilon = 1e-12);
    }

    #[test]
    fn radius_matches_closed_form() {
        // square box at IoU 0.5: the contained-ground-truth case 2x^2 + 20x - 50 = 0 dominates
        let radius = gaussian_radius([10.0, 10.0], 0.5, RadiusMode::Legacy);
        assert_abs_diff_eq!(radius, 10.0 * (2f64.sqrt() - 1.0), epsilon = 1e-12);
    }

    #[test]
    fn corrected_radius_is_tighter() {
        for &[h, w] in &[[10.0, 10.0], [20.0, 40.0], [3.0, 120.0], [64.0, 8.0]] {
            let legacy = gaussian_radius([h, w], 0.7, RadiusMode::Legacy);
            let corrected = gaussian_radius([h, w], 0.7, RadiusMode::Corrected);
            assert!(corrected >= 0.0);
            assert!(corrected <= legacy, "{} > {} for {}x{}", corrected, legacy, h, w);
        }
    }

    #[test]
    fn negative_discriminant_is_nan() {
        assert!(smallest_positive_root(1.0f32, 0.0, 1.0, RadiusMode::Legacy).is_nan());
        assert!(smallest_positive_root(1.0f32, 0.0, 1.0, RadiusMode::Corrected).is_nan());
    }

    #[test]
    fn batched_radius_keeps_leading_shape() -> Result<()> {
        let sizes = array![
            [[10.0f32, 10.0], [20.0, 40.0]],
            [[5.0, 7.5], [1.0, 1.0]],
        ];
        let radii = gaussian_radius_batch(&sizes, 0.7, RadiusMode::Legacy)?;
        assert_eq!(radii.shape(), &[2, 2]);

        for ((i, j), &radius) in radii.indexed_iter() {
            let size = [sizes[[i, j, 0]], sizes[[i, j, 1]]];
            let expect = gaussian_radius(size, 0.7, RadiusMode::Legacy);
            assert_abs_diff_eq!(radius, expect);
        }
        Ok(())
    }

    #[test]
    fn batched_radius_rejects_bad_shape() {
        let sizes = array![[10.0, 10.0, 1.0]];
        assert!(gaussian_radius_batch(&sizes, 0.7, RadiusMode::Legacy).is_err());
    }
}
