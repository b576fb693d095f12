pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use bbox::{prelude::*, Transform, HW, XYWH};
pub use itertools::Itertools;
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use opencv::{
    core::{self as core_cv, Mat, Scalar, Size, Vector},
    highgui, imgcodecs, imgproc,
    objdetect::{self, CascadeClassifier},
    prelude::*,
};
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    convert::{TryFrom, TryInto},
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
pub use tracing::{debug, info, warn};
