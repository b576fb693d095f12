use crate::common::*;

/// Image or box size in height-width order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HW<T> {
    h: T,
    w: T,
}

impl<T> HW<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn try_from_hw(hw: [T; 2]) -> Result<Self> {
        let [h, w] = hw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "height and width parameters must be non-negative"
        );
        Ok(Self { h, w })
    }

    /// # Panics
    /// If the height or the width is negative.
    pub fn from_hw(hw: [T; 2]) -> Self {
        Self::try_from_hw(hw).unwrap()
    }

    pub fn area(&self) -> T {
        self.w * self.h
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn h(&self) -> T {
        self.h
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> T {
        if self.h <= self.w {
            self.h
        } else {
            self.w
        }
    }

    pub fn to_f64(&self) -> HW<f64>
    where
        T: Into<f64>,
    {
        HW {
            h: self.h.into(),
            w: self.w.into(),
        }
    }
}

impl HW<i32> {
    /// Shrink the size to `max_height` keeping the aspect ratio, or return
    /// `None` if it already fits. The width is truncated and kept at least 1.
    pub fn fit_height(&self, max_height: i32) -> Option<Self> {
        if max_height <= 0 || self.h <= max_height {
            return None;
        }

        let scale = max_height as f64 / self.h as f64;
        let w = ((self.w as f64 * scale) as i32).max(1);
        Some(Self { h: max_height, w })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn size_area() {
        let s1 = HW::from_hw([3.0, 2.0]);
        let area: f64 = s1.area();
        assert_abs_diff_eq!(area, 6.0);
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(HW::try_from_hw([-1, 2]).is_err());
    }

    #[test]
    fn min_side() {
        assert_eq!(HW::from_hw([480, 640]).min_side(), 480);
        assert_eq!(HW::from_hw([1080, 720]).min_side(), 720);
    }

    #[test]
    fn fit_height_only_shrinks() {
        let size = HW::from_hw([2000, 3000]);
        assert_eq!(size.fit_height(1000), Some(HW::from_hw([1000, 1500])));
        assert_eq!(size.fit_height(2000), None);
        assert_eq!(size.fit_height(4000), None);
    }

    #[test]
    fn fit_height_truncates_width() {
        let size = HW::from_hw([3, 10]);
        assert_eq!(size.fit_height(2), Some(HW::from_hw([2, 6])));

        let narrow = HW::from_hw([1000, 1]);
        assert_eq!(narrow.fit_height(10), Some(HW::from_hw([10, 1])));
    }
}
