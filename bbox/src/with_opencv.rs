use crate::{common::*, Rect, HW, XYWH};
use opencv::core as core_cv;

/// Detector output is trusted to be well formed. Negative sizes are clamped.
impl<T> From<&core_cv::Rect_<T>> for XYWH<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: &core_cv::Rect_<T>) -> Self {
        let core_cv::Rect_ {
            x,
            y,
            width,
            height,
        } = *from;
        Self::from_xywh_clamped([x, y, width, height])
    }
}

impl<T> From<core_cv::Rect_<T>> for XYWH<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: core_cv::Rect_<T>) -> Self {
        (&from).into()
    }
}

impl<T> From<&XYWH<T>> for core_cv::Rect_<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: &XYWH<T>) -> Self {
        Self {
            x: from.l(),
            y: from.t(),
            width: from.w(),
            height: from.h(),
        }
    }
}

impl<T> From<XYWH<T>> for core_cv::Rect_<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: XYWH<T>) -> Self {
        (&from).into()
    }
}

impl<T> TryFrom<core_cv::Size_<T>> for HW<T>
where
    T: Copy + Num + PartialOrd,
{
    type Error = Error;

    fn try_from(from: core_cv::Size_<T>) -> Result<Self, Self::Error> {
        let core_cv::Size_ { width, height } = from;
        Self::try_from_hw([height, width])
    }
}

impl<T> From<&HW<T>> for core_cv::Size_<T>
where
    T: Copy + Num + PartialOrd,
{
    fn from(from: &HW<T>) -> Self {
        Self {
            width: from.w(),
            height: from.h(),
        }
    }
}
