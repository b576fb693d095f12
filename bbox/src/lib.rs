//! Safe pixel bounding box types and overlap suppression.

mod common;

pub mod into_xywh;
pub use into_xywh::*;

pub use transform::*;
mod transform;

pub use rect::*;
pub mod rect;

pub use tlbr::*;
pub mod tlbr;

pub use xywh::*;
pub mod xywh;

pub use hw::*;
pub mod hw;

pub use suppress::*;
pub mod suppress;

#[cfg(feature = "opencv")]
mod with_opencv;

pub mod prelude {
    pub use crate::{
        rect::{Rect, RectNum, RectRatio},
        suppress::{suppress_overlapping, OverlapSuppressor},
    };
}
