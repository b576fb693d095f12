pub use anyhow::{ensure, Error, Result};
pub use num_traits::{Num, Zero};
pub use std::ops::Mul;
