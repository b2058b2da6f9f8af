use super::{Rect, TLBR};
use crate::{common::*, Transform};

/// Bounding box in CyCxHW format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CyCxHW<T> {
    pub(crate) cy: T,
    pub(crate) cx: T,
    pub(crate) h: T,
    pub(crate) w: T,
}

impl<T> CyCxHW<T>
where
    T: Copy + Num,
{
    /// Maps the center affinely and scales the extent, leaving the box shape intact.
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        CyCxHW {
            cy: self.cy * transform.sy + transform.ty,
            cx: self.cx * transform.sx + transform.tx,
            h: self.h * transform.sy,
            w: self.w * transform.sx,
        }
    }
}

impl<T> Rect for CyCxHW<T>
where
    T: Copy + Num,
{
    type Type = T;

    fn t(&self) -> T {
        let two = T::one() + T::one();
        self.cy - self.h / two
    }

    fn l(&self) -> T {
        let two = T::one() + T::one();
        self.cx - self.w / two
    }

    fn b(&self) -> T {
        let two = T::one() + T::one();
        self.cy + self.h / two
    }

    fn r(&self) -> T {
        let two = T::one() + T::one();
        self.cx + self.w / two
    }

    fn cy(&self) -> T {
        self.cy
    }

    fn cx(&self) -> T {
        self.cx
    }

    fn h(&self) -> T {
        self.h
    }

    fn w(&self) -> T {
        self.w
    }
}

impl<T> From<&TLBR<T>> for CyCxHW<T>
where
    T: Copy + Num,
{
    fn from(from: &TLBR<T>) -> Self {
        let two = T::one() + T::one();
        let TLBR { t, l, b, r } = *from;
        let h = b - t;
        let w = r - l;
        Self {
            cy: t + h / two,
            cx: l + w / two,
            h,
            w,
        }
    }
}
