//! Shape inspection, padding and resizing of `(H, W, C)` and `(N, H, W, C)` images.

use crate::common::*;
use ndarray::{Array4, Ix4};

/// Returns `(height, width)` of a channels-last image or image batch.
pub fn image_hw<S, D>(image: &ArrayBase<S, D>) -> Result<(usize, usize)>
where
    S: Data,
    D: Dimension,
{
    match *image.shape() {
        [_batch, height, width, _channels] => Ok((height, width)),
        [height, width, _channels] => Ok((height, width)),
        ref shape => bail!(
            "invalid shape: expect three or four dimensions, but get {:?}",
            shape
        ),
    }
}

/// Places `image` on a zero canvas of `target_height` x `target_width` with its
/// top-left corner at `(offset_height, offset_width)`.
pub fn pad_to_bounding_box<T, S, D>(
    image: &ArrayBase<S, D>,
    offset_height: usize,
    offset_width: usize,
    target_height: usize,
    target_width: usize,
) -> Result<Array<T, D>>
where
    T: Clone + num_traits::Zero,
    S: Data<Elem = T>,
    D: Dimension,
{
    let (height, width) = image_hw(image)?;
    ensure!(
        offset_height + height <= target_height && offset_width + width <= target_width,
        "a {}x{} image at offset ({}, {}) does not fit in a {}x{} canvas",
        height,
        width,
        offset_height,
        offset_width,
        target_height,
        target_width
    );

    let h_axis = Axis(image.ndim() - 3);
    let w_axis = Axis(image.ndim() - 2);

    let mut dim = image.raw_dim();
    dim[h_axis.index()] = target_height;
    dim[w_axis.index()] = target_width;

    let mut canvas = Array::zeros(dim);
    {
        let mut region =
            canvas.slice_axis_mut(h_axis, Slice::from(offset_height..offset_height + height));
        region.slice_axis_inplace(w_axis, Slice::from(offset_width..offset_width + width));
        region.assign(image);
    }
    Ok(canvas)
}

/// Bilinear resize with half-pixel centers.
///
/// Sampling the same size returns the input unchanged.
pub fn resize_bilinear<T, S, D>(
    image: &ArrayBase<S, D>,
    new_height: usize,
    new_width: usize,
) -> Result<Array<T, D>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    let (height, width) = image_hw(image)?;
    ensure!(
        height > 0 && width > 0 && new_height > 0 && new_width > 0,
        "cannot resize a {}x{} image to {}x{}",
        height,
        width,
        new_height,
        new_width
    );

    let batched = image.ndim() == 4;
    let input: ArrayView<T, Ix4> = if batched {
        image.view().into_dimensionality()?
    } else {
        image.view().into_dyn().insert_axis(Axis(0)).into_dimensionality()?
    };
    let (batch, _, _, channels) = input.dim();

    let rows = interpolation_weights::<T>(height, new_height);
    let cols = interpolation_weights::<T>(width, new_width);

    let output = Array4::from_shape_fn((batch, new_height, new_width, channels), |(b, y, x, c)| {
        let (top, bottom, y_lerp) = rows[y];
        let (left, right, x_lerp) = cols[x];

        let top_left = input[[b, top, left, c]];
        let top_right = input[[b, top, right, c]];
        let bottom_left = input[[b, bottom, left, c]];
        let bottom_right = input[[b, bottom, right, c]];

        let upper = top_left + (top_right - top_left) * x_lerp;
        let lower = bottom_left + (bottom_right - bottom_left) * x_lerp;
        upper + (lower - upper) * y_lerp
    });

    let output = if batched {
        output.into_dimensionality()?
    } else {
        output.index_axis_move(Axis(0), 0).into_dimensionality()?
    };
    Ok(output)
}

/// For each output position, the two neighboring source positions and the
/// weight of the second one.
fn interpolation_weights<T>(in_size: usize, out_size: usize) -> Vec<(usize, usize, T)>
where
    T: Float,
{
    let scale = in_size as f64 / out_size as f64;
    let last = (in_size - 1) as f64;

    (0..out_size)
        .map(|out| {
            let pos = (out as f64 + 0.5) * scale - 0.5;
            let floor = pos.floor();
            let lower = floor.max(0.0) as usize;
            let upper = pos.ceil().min(last) as usize;
            (lower, upper, cast(pos - floor))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array3};

    #[test]
    fn image_hw_of_single_and_batched_images() -> Result<()> {
        let image = Array3::<f32>::zeros((4, 6, 3));
        assert_eq!(image_hw(&image)?, (4, 6));

        let batch = Array4::<f32>::zeros((2, 5, 7, 1));
        assert_eq!(image_hw(&batch)?, (5, 7));
        Ok(())
    }

    #[test]
    fn image_hw_rejects_other_ranks() {
        let image = Array2::<f32>::zeros((4, 6));
        let err = image_hw(&image).unwrap_err();
        assert!(err.to_string().starts_with("invalid shape"));

        let image = ArrayD::<f32>::zeros(IxDyn(&[1, 2, 3, 4, 5]));
        assert!(image_hw(&image).is_err());
    }

    #[test]
    fn pad_places_image_at_offset() -> Result<()> {
        let image = Array3::from_elem((2, 3, 1), 1.0f32);
        let canvas = pad_to_bounding_box(&image, 1, 0, 4, 3)?;
        assert_eq!(canvas.shape(), &[4, 3, 1]);
        assert_eq!(canvas.sum(), 6.0);
        assert!(canvas.slice(s![1..3, .., ..]).iter().all(|&value| value == 1.0));
        assert!(canvas.slice(s![0, .., ..]).iter().all(|&value| value == 0.0));

        assert!(pad_to_bounding_box(&image, 3, 0, 4, 3).is_err());
        Ok(())
    }

    #[test]
    fn pad_batched_images() -> Result<()> {
        let batch = Array4::from_elem((2, 2, 2, 3), 1u8);
        let canvas = pad_to_bounding_box(&batch, 0, 1, 2, 3)?;
        assert_eq!(canvas.shape(), &[2, 2, 3, 3]);
        assert!(canvas.slice(s![.., .., 0, ..]).iter().all(|&value| value == 0));
        Ok(())
    }

    #[test]
    fn resize_to_same_size_is_identity() -> Result<()> {
        let image = Array3::from_shape_fn((5, 4, 2), |(y, x, c)| (y * 8 + x * 2 + c) as f32);
        let resized = resize_bilinear(&image, 5, 4)?;
        assert_eq!(resized, image);
        Ok(())
    }

    #[test]
    fn resize_interpolates() -> Result<()> {
        let image = array![[[0.0f64], [4.0]], [[8.0], [12.0]]];

        let doubled = resize_bilinear(&image, 4, 4)?;
        assert_eq!(doubled.shape(), &[4, 4, 1]);
        assert_abs_diff_eq!(doubled[[0, 0, 0]], 0.0);
        assert_abs_diff_eq!(doubled[[0, 1, 0]], 1.0);
        assert_abs_diff_eq!(doubled[[1, 1, 0]], 3.0);
        assert_abs_diff_eq!(doubled[[3, 3, 0]], 12.0);

        let shrunk = resize_bilinear(&image, 1, 1)?;
        assert_abs_diff_eq!(shrunk[[0, 0, 0]], 6.0);
        Ok(())
    }
}
