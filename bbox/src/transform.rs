use super::{Rect, XYWH};
use crate::{common::*, HW};

/// Axis-aligned scaling followed by a translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + PartialOrd,
{
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

    /// Stretch an image of `src_size` onto `tgt_size`.
    pub fn from_sizes_exact(src_size: &HW<T>, tgt_size: &HW<T>) -> Self {
        let zero = T::zero();
        let src = XYWH {
            x: zero,
            y: zero,
            w: src_size.w(),
            h: src_size.h(),
        };
        let tgt = XYWH {
            x: zero,
            y: zero,
            w: tgt_size.w(),
            h: tgt_size.h(),
        };
        Self::from_rects(&src, &tgt)
    }

    pub fn inverse(&self) -> Self {
        let zero = T::zero();
        let sy = T::one() / self.sy;
        let sx = T::one() / self.sx;
        let ty = (zero - self.ty) / self.sy;
        let tx = (zero - self.tx) / self.sx;

        Self { sy, sx, ty, tx }
    }
}

impl<T> XYWH<T>
where
    T: Copy + Num,
{
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        XYWH {
            x: self.x * transform.sx + transform.tx,
            y: self.y * transform.sy + transform.ty,
            w: self.w * transform.sx,
            h: self.h * transform.sy,
        }
    }
}

impl<T> Mul<&XYWH<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = XYWH<T>;

    fn mul(self, rhs: &XYWH<T>) -> Self::Output {
        rhs.transform(self)
    }
}
