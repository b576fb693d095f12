use super::{TLBR, XYWH};
use crate::common::*;

/// The generic rectangle.
pub trait Rect {
    type Type;

    fn t(&self) -> Self::Type;
    fn l(&self) -> Self::Type;
    fn b(&self) -> Self::Type;
    fn r(&self) -> Self::Type;
    fn h(&self) -> Self::Type;
    fn w(&self) -> Self::Type;

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_xywh(xywh: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;
}

pub trait RectNum: Rect
where
    Self::Type: Copy + Num + PartialOrd,
{
    /// # Panics
    /// If the corners are not ordered.
    fn from_tlbr(tlbr: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_tlbr(tlbr).unwrap()
    }

    /// # Panics
    /// If the width or the height is negative.
    fn from_xywh(xywh: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_xywh(xywh).unwrap()
    }

    fn tlbr(&self) -> [Self::Type; 4] {
        [self.t(), self.l(), self.b(), self.r()]
    }

    fn xywh(&self) -> [Self::Type; 4] {
        [self.l(), self.t(), self.w(), self.h()]
    }

    fn to_tlbr(&self) -> TLBR<Self::Type> {
        TLBR {
            t: self.t(),
            l: self.l(),
            b: self.b(),
            r: self.r(),
        }
    }

    fn to_xywh(&self) -> XYWH<Self::Type> {
        XYWH {
            x: self.l(),
            y: self.t(),
            w: self.w(),
            h: self.h(),
        }
    }

    fn area(&self) -> Self::Type {
        self.h() * self.w()
    }

    /// Compute the intersection in TLBR format, or `None` if the rectangles do not overlap.
    fn intersect_with<R>(&self, other: &R) -> Option<TLBR<Self::Type>>
    where
        R: Rect<Type = Self::Type>,
    {
        let t = partial_max(self.t(), other.t());
        let l = partial_max(self.l(), other.l());
        let b = partial_min(self.b(), other.b());
        let r = partial_min(self.r(), other.r());
        (b > t && r > l).then(|| TLBR { t, l, b, r })
    }

    fn intersection_area_with<R>(&self, other: &R) -> Self::Type
    where
        R: Rect<Type = Self::Type>,
    {
        self.intersect_with(other)
            .map(|rect| rect.area())
            .unwrap_or_else(<Self::Type as Zero>::zero)
    }
}

/// Area ratios computed in `f64` so that integer pixel boxes do not overflow.
pub trait RectRatio: RectNum
where
    Self::Type: Copy + Num + PartialOrd + Into<f64>,
{
    fn area_f64(&self) -> f64 {
        let h: f64 = self.h().into();
        let w: f64 = self.w().into();
        h * w
    }

    /// Intersection area divided by the smaller of the two areas.
    ///
    /// The ratio is defined as zero when either rectangle has zero area, so
    /// degenerate boxes never count as overlapping.
    fn overlap_ratio_with<R>(&self, other: &R) -> f64
    where
        R: Rect<Type = Self::Type>,
    {
        let other_area = {
            let h: f64 = other.h().into();
            let w: f64 = other.w().into();
            h * w
        };
        let min_area = self.area_f64().min(other_area);
        if min_area <= 0.0 {
            return 0.0;
        }

        let inter_area = self
            .intersect_with(other)
            .map(|rect| rect.area_f64())
            .unwrap_or(0.0);
        inter_area / min_area
    }
}

impl<T> RectNum for T
where
    T: Rect,
    T::Type: Copy + Num + PartialOrd,
{
}

impl<T> RectRatio for T
where
    T: Rect,
    T::Type: Copy + Num + PartialOrd + Into<f64>,
{
}

fn partial_max<T: PartialOrd>(lhs: T, rhs: T) -> T {
    if lhs >= rhs {
        lhs
    } else {
        rhs
    }
}

fn partial_min<T: PartialOrd>(lhs: T, rhs: T) -> T {
    if lhs <= rhs {
        lhs
    } else {
        rhs
    }
}
