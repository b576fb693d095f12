use super::{Rect, XYWH};
use crate::common::*;

/// Bounding box in TLBR format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self> {
        let [x, y, w, h] = xywh;
        let zero = T::zero();
        ensure!(w >= zero && h >= zero, "w and h must be non-negative");
        Ok(Self {
            t: y,
            l: x,
            b: y + h,
            r: x + w,
        })
    }
}

impl<T> From<XYWH<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: XYWH<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&XYWH<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: &XYWH<T>) -> Self {
        let XYWH { x, y, w, h } = *from;
        Self {
            t: y,
            l: x,
            b: y + h,
            r: x + w,
        }
    }
}
