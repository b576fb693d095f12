use super::{Rect, TLBR};
use crate::common::*;

/// Bounding box in XYWH format, the layout detectors and OpenCV report.
///
/// `x` and `y` locate the top-left corner in pixel coordinates. The width and
/// height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XYWH<T> {
    pub(crate) x: T,
    pub(crate) y: T,
    pub(crate) w: T,
    pub(crate) h: T,
}

impl<T> XYWH<T>
where
    T: Copy,
{
    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn to_f64(&self) -> XYWH<f64>
    where
        T: Into<f64>,
    {
        XYWH {
            x: self.x.into(),
            y: self.y.into(),
            w: self.w.into(),
            h: self.h.into(),
        }
    }
}

impl<T> XYWH<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Build a box from possibly malformed detector output. Negative sizes
    /// are clamped to zero, which makes the box degenerate instead of invalid.
    pub fn from_xywh_clamped(xywh: [T; 4]) -> Self {
        let [x, y, w, h] = xywh;
        let zero = T::zero();
        let w = if w < zero { zero } else { w };
        let h = if h < zero { zero } else { h };
        Self { x, y, w, h }
    }
}

impl<T> Rect for XYWH<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.y
    }

    fn l(&self) -> Self::Type {
        self.x
    }

    fn b(&self) -> Self::Type {
        self.y + self.h
    }

    fn r(&self) -> Self::Type {
        self.x + self.w
    }

    fn h(&self) -> Self::Type {
        self.h
    }

    fn w(&self) -> Self::Type {
        self.w
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self {
            x: l,
            y: t,
            w: r - l,
            h: b - t,
        })
    }

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self> {
        let [x, y, w, h] = xywh;
        let zero = T::zero();
        ensure!(w >= zero && h >= zero, "w and h must be non-negative");

        Ok(Self { x, y, w, h })
    }
}

impl<T> From<TLBR<T>> for XYWH<T>
where
    T: Copy + Num,
{
    fn from(from: TLBR<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&TLBR<T>> for XYWH<T>
where
    T: Copy + Num,
{
    fn from(from: &TLBR<T>) -> Self {
        let TLBR { t, l, b, r } = *from;
        Self {
            x: l,
            y: t,
            w: r - l,
            h: b - t,
        }
    }
}
