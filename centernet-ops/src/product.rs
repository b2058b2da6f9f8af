use crate::common::*;

/// Enumerates every combination of the input sequences, one combination per row.
///
/// Rows follow lexicographic order with the last sequence varying fastest, and
/// the sequences are cycled `repeat` times. An empty sequence yields no rows,
/// while an empty sequence list yields a single empty row.
pub fn cartesian_product<E, Q>(sequences: &[Q], repeat: usize) -> Array2<E>
where
    E: Clone,
    Q: AsRef<[E]>,
{
    let pools: Vec<&[E]> = (0..repeat)
        .flat_map(|_| sequences.iter().map(|seq| seq.as_ref()))
        .collect();
    let n_cols = pools.len();

    // stride of column k is the number of rows before its value changes
    let mut strides = vec![1; n_cols];
    for col in (0..n_cols.saturating_sub(1)).rev() {
        strides[col] = strides[col + 1] * pools[col + 1].len();
    }
    let n_rows: usize = pools.iter().map(|pool| pool.len()).product();

    Array2::from_shape_fn((n_rows, n_cols), |(row, col)| {
        let pool = pools[col];
        pool[(row / strides[col]) % pool.len()].clone()
    })
}
