//! Clipped Gaussian rasterization onto `(H, W, C)` heatmaps.

use crate::{cartesian_product, common::*, kernel::gaussian_weight};

/// A Gaussian blob request in heatmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blob {
    /// The target channel.
    pub class: i64,
    pub x: i64,
    pub y: i64,
    pub radius: i64,
}

impl Blob {
    pub fn new(class: i64, x: i64, y: i64, radius: i64) -> Self {
        Self {
            class,
            x,
            y,
            radius,
        }
    }

    /// Builds a blob from `[class, x, y, radius]`, truncating each value toward zero.
    pub fn try_from_floats<T>(blob: [T; 4]) -> Result<Self>
    where
        T: Float + Debug,
    {
        let [class, x, y, radius] = blob;
        let to_i64 = |value: T| {
            value.to_i64().ok_or_else(|| {
                format_err!("blob component {:?} is not representable as i64", value)
            })
        };
        Ok(Self {
            class: to_i64(class)?,
            x: to_i64(x)?,
            y: to_i64(y)?,
            radius: to_i64(radius)?,
        })
    }
}

impl From<[i64; 4]> for Blob {
    fn from([class, x, y, radius]: [i64; 4]) -> Self {
        Self::new(class, x, y, radius)
    }
}

/// Renders a single Gaussian blob on a fresh zero heatmap of shape `hm_shape`.
///
/// The kernel is sized for the full radius and clipped to the heatmap, so blobs
/// centered near or beyond an edge keep only the part that falls inside. Blobs
/// that do not touch the heatmap, have a negative radius or target a missing
/// channel leave the heatmap all zero.
pub fn draw_gaussian<T>(hm_shape: [usize; 3], blob: Blob, scaling_factor: T) -> Array3<T>
where
    T: Float,
{
    let heatmap = Array3::zeros(hm_shape);
    let (indices, values) = gaussian_updates(hm_shape, blob, scaling_factor);
    write_updates(heatmap, indices.view(), &values)
}

/// Writes `values[i]` at the `(row, col, channel)` given by the i-th row of
/// `indices`, overwriting previous content. Later rows win on duplicate indices.
pub fn scatter_update<T>(
    buffer: Array3<T>,
    indices: ArrayView2<i64>,
    values: &[T],
) -> Result<Array3<T>>
where
    T: Clone,
{
    ensure!(
        indices.ncols() == 3,
        "invalid shape: expect (N, 3) indices, but get {:?}",
        indices.shape()
    );
    ensure!(
        indices.nrows() == values.len(),
        "the number of indices ({}) does not match the number of values ({})",
        indices.nrows(),
        values.len()
    );

    let shape = buffer.shape();
    if let Some(index) = indices.outer_iter().find(|index| {
        index
            .iter()
            .zip(shape)
            .any(|(&pos, &size)| pos < 0 || pos >= size as i64)
    }) {
        bail!(
            "index {:?} is out of bounds for shape {:?}",
            index.to_vec(),
            shape
        );
    }

    Ok(write_updates(buffer, indices, values))
}

/// The flat index and value lists of a clipped blob.
fn gaussian_updates<T>(
    hm_shape: [usize; 3],
    blob: Blob,
    scaling_factor: T,
) -> (Array2<i64>, Vec<T>)
where
    T: Float,
{
    let empty = || (Array2::zeros((0, 3)), vec![]);
    let [height, width, channels] = hm_shape;
    let Blob {
        class,
        x,
        y,
        radius,
    } = blob;

    if radius < 0 {
        trace!("skip blob {:?} with negative radius", blob);
        return empty();
    }
    if !(0..channels as i64).contains(&class) {
        debug!(
            "skip blob {:?} since the heatmap has {} channels",
            blob, channels
        );
        return empty();
    }

    let (height, width) = (height as i64, width as i64);
    let left = x.min(radius);
    let right = width.saturating_sub(x).min(radius.saturating_add(1));
    let top = y.min(radius);
    let bottom = height.saturating_sub(y).min(radius.saturating_add(1));

    let rows = (y - top)..y.saturating_add(bottom);
    let cols = (x - left)..x.saturating_add(right);
    if rows.is_empty() || cols.is_empty() {
        trace!("blob {:?} does not intersect the heatmap", blob);
        return empty();
    }

    // only the clipped window of the kernel is evaluated
    let weight = gaussian_weight::<T, _>(radius);
    let values: Vec<T> = rows
        .clone()
        .cartesian_product(cols.clone())
        .map(|(row, col)| weight(row - y, col - x) * scaling_factor)
        .collect();

    let sequences = [rows.collect_vec(), cols.collect_vec(), vec![class]];
    let indices = cartesian_product(&sequences, 1);
    debug_assert_eq!(indices.nrows(), values.len());

    (indices, values)
}

fn write_updates<T>(mut buffer: Array3<T>, indices: ArrayView2<i64>, values: &[T]) -> Array3<T>
where
    T: Clone,
{
    for (index, value) in indices.outer_iter().zip(values) {
        let pos = [index[0] as usize, index[1] as usize, index[2] as usize];
        buffer[pos] = value.clone();
    }
    buffer
}
