use crate::common::*;

/// Builds the `(2r+1, 2r+1)` Gaussian patch `exp(-(x^2 + y^2) / 2σ^2)` with `σ = r / 3`.
///
/// The peak at the center is exactly one. A zero radius yields the single cell `[[1]]`.
///
/// # Panics
/// Panics if `2r + 1` overflows `usize`.
pub fn gaussian_kernel<T>(radius: usize) -> Array2<T>
where
    T: Float,
{
    if radius == 0 {
        return Array2::from_elem((1, 1), T::one());
    }

    let width = match radius.checked_mul(2).and_then(|len| len.checked_add(1)) {
        Some(width) => width,
        None => panic!("kernel radius {} is too large", radius),
    };
    let center = radius as i64;
    let weight = gaussian_weight::<T, _>(radius);

    Array2::from_shape_fn((width, width), |(row, col)| {
        weight(row as i64 - center, col as i64 - center)
    })
}

/// The kernel value at offset `(dy, dx)` from the center, without materializing the patch.
pub(crate) fn gaussian_weight<T, R>(radius: R) -> impl Fn(i64, i64) -> T
where
    T: Float,
    R: ToPrimitive,
{
    let two = T::one() + T::one();
    let sigma: T = cast::<T, _>(radius) / cast(3);
    let denom = two * sigma * sigma;

    move |dy, dx| {
        if denom == T::zero() {
            return T::one();
        }
        let y: T = cast(dy);
        let x: T = cast(dx);
        ((-(x * x) - y * y) / denom).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_radius_kernel() {
        let kernel = gaussian_kernel::<f32>(0);
        assert_eq!(kernel.shape(), &[1, 1]);
        assert_eq!(kernel[[0, 0]], 1.0);
    }

    #[test]
    fn kernel_peak_and_shape() {
        for radius in 1..8 {
            let kernel = gaussian_kernel::<f64>(radius);
            let width = 2 * radius + 1;
            assert_eq!(kernel.shape(), &[width, width]);
            assert_eq!(kernel[[radius, radius]], 1.0);
            assert!(kernel.iter().all(|&value| value > 0.0 && value <= 1.0));
        }
    }

    #[test]
    fn kernel_is_symmetric() {
        let kernel = gaussian_kernel::<f32>(4);
        let rotated = kernel.slice(s![..;-1, ..;-1]);
        assert_eq!(kernel.view(), rotated);
        assert_eq!(kernel.t(), kernel.view());
    }

    #[test]
    fn kernel_values() {
        // one pixel off the center at radius 1 gives exp(-4.5)
        let kernel = gaussian_kernel::<f64>(1);
        assert_abs_diff_eq!(kernel[[1, 0]], (-4.5f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(kernel[[0, 0]], (-9.0f64).exp(), epsilon = 1e-12);
    }
}
