use super::{CyCxHW, Rect};
use crate::common::*;

/// Bounding box in TLBR format, i.e. `[y0, x0, y1, x1]` corners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T> {
    /// Builds a box from corners without checking their order.
    pub fn from_tlbr_unchecked(tlbr: [T; 4]) -> Self {
        let [t, l, b, r] = tlbr;
        Self { t, l, b, r }
    }

    pub fn into_array(self) -> [T; 4] {
        let Self { t, l, b, r } = self;
        [t, l, b, r]
    }
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn try_from_tlbr(tlbr: [T; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");
        Ok(Self { t, l, b, r })
    }

    pub fn zeros() -> Self {
        let zero = T::zero();
        Self {
            t: zero,
            l: zero,
            b: zero,
            r: zero,
        }
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> T {
        self.t
    }

    fn l(&self) -> T {
        self.l
    }

    fn b(&self) -> T {
        self.b
    }

    fn r(&self) -> T {
        self.r
    }

    fn cy(&self) -> T {
        let two = T::one() + T::one();
        self.t + self.h() / two
    }

    fn cx(&self) -> T {
        let two = T::one() + T::one();
        self.l + self.w() / two
    }

    fn h(&self) -> T {
        self.b - self.t
    }

    fn w(&self) -> T {
        self.r - self.l
    }
}

impl<T> From<&CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: &CyCxHW<T>) -> Self {
        let two = T::one() + T::one();
        let CyCxHW { cy, cx, h, w } = *from;
        Self {
            t: cy - h / two,
            l: cx - w / two,
            b: cy + h / two,
            r: cx + w / two,
        }
    }
}
