use super::{CyCxHW, Rect};
use crate::common::*;

/// Per-axis scale followed by translation, `y' = y * sy + ty`, `x' = x * sx + tx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num,
{
    /// The transform that maps `src` onto `tgt`.
    pub fn from_rects<R>(src: &R, tgt: &R) -> Self
    where
        R: Rect<Type = T>,
    {
        let sy = tgt.h() / src.h();
        let sx = tgt.w() / src.w();
        let ty = tgt.t() - src.t() * sy;
        let tx = tgt.l() - src.l() * sx;
        Self { sy, sx, ty, tx }
    }
}

impl<'a, T> Mul<&'a CyCxHW<T>> for &'a Transform<T>
where
    T: Copy + Num,
{
    type Output = CyCxHW<T>;

    fn mul(self, rhs: &'a CyCxHW<T>) -> Self::Output {
        rhs.transform(self)
    }
}
