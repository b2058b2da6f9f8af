//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use bbox::{prelude::*, CyCxHW, Transform, TLBR};
pub use getset::Getters;
pub use itertools::Itertools;
pub use log::{debug, trace, warn};
pub use ndarray::{
    s, Array, Array1, Array2, Array3, ArrayBase, ArrayD, ArrayView, ArrayView2, Axis, Data,
    Dimension, IxDyn, RemoveAxis, Slice, Zip,
};
pub use noisy_float::prelude::*;
pub use num_traits::{Float, ToPrimitive};
pub use serde::{Deserialize, Serialize};
pub use std::{fmt::Debug, num::NonZeroUsize, path::Path};

/// Converts between numeric types, yielding NaN when the value is not representable.
pub(crate) fn cast<T, V>(value: V) -> T
where
    T: Float,
    V: ToPrimitive,
{
    T::from(value).unwrap_or_else(T::nan)
}
