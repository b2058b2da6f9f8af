use crate::common::*;

/// Truncates or pads `value` along `pad_axis` to exactly `instances` entries.
///
/// Negative axes count from the last dimension. Non-positive `instances`
/// yields an empty axis. All other axes keep their lengths.
pub fn pad_max_instances<T, S, D>(
    value: &ArrayBase<S, D>,
    instances: i64,
    pad_value: T,
    pad_axis: isize,
) -> Result<Array<T, D>>
where
    T: Clone,
    S: Data<Elem = T>,
    D: RemoveAxis,
{
    let ndim = value.ndim() as isize;
    let resolved = if pad_axis < 0 {
        ndim + pad_axis
    } else {
        pad_axis
    };
    ensure!(
        (0..ndim).contains(&resolved),
        "pad axis {} is out of range for a {}-dimensional array",
        pad_axis,
        ndim
    );
    let axis = Axis(resolved as usize);

    let instances = instances.max(0) as usize;
    let take = instances.min(value.len_of(axis));
    let kept = value.slice_axis(axis, Slice::from(0..take));

    let mut pad_dim = value.raw_dim();
    pad_dim[axis.index()] = instances - take;
    let padding = Array::from_elem(pad_dim, pad_value);

    let output = ndarray::concatenate(axis, &[kept, padding.view()])?;
    Ok(output)
}
