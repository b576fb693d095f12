use crate::common::*;

pub use detector::*;
pub use input::*;
pub use output::*;
pub use preprocess::*;
pub use suppression::*;

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub suppression: SuppressionConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Self::from_json5(&text)
    }

    pub fn from_json5(text: &str) -> Result<Self> {
        let config: Self = json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            detector,
            preprocess,
            suppression,
            input,
            output,
            ..
        } = self;

        // passed to OpenCV as int
        ensure_fits_i32("detector.min_neighbors", detector.min_neighbors)?;
        ensure_fits_i32("detector.min_face_size", detector.min_face_size)?;
        ensure_fits_i32("detector.min_face_divisor", detector.min_face_divisor.get())?;
        if let Some(max_height) = preprocess.max_height {
            ensure_fits_i32("preprocess.max_height", max_height.get())?;
        }
        ensure_fits_i32("preprocess.blur_kernel", preprocess.blur_kernel.get())?;
        ensure_fits_i32("preprocess.bilateral_diameter", preprocess.bilateral_diameter)?;
        ensure_fits_i32("output.thickness", output.thickness.get())?;

        ensure!(
            detector.scale_factor.raw() > 1.0,
            "detector.scale_factor must be greater than 1, but get {}",
            detector.scale_factor
        );
        ensure!(
            preprocess.blur_kernel.get() % 2 == 1,
            "preprocess.blur_kernel must be odd, but get {}",
            preprocess.blur_kernel
        );
        ensure!(
            preprocess.bilateral_sigma_color.raw() >= 0.0
                && preprocess.bilateral_sigma_space.raw() >= 0.0,
            "bilateral filter sigmas must be non-negative"
        );
        OverlapSuppressor::new(suppression.overlap_threshold.raw())?;
        ensure!(
            !input.extensions.is_empty(),
            "input.extensions must not be empty"
        );
        ensure!(
            !output.window_name.is_empty(),
            "output.window_name must not be empty"
        );

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Version::new(0, 1, 0),
            detector: DetectorConfig::default(),
            preprocess: PreprocessConfig::default(),
            suppression: SuppressionConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

mod detector {
    use super::*;

    /// Cascade classifier options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DetectorConfig {
        /// Path to the Haar cascade file. Paths that do not exist are looked up in
        /// the OpenCV sample data directories.
        #[serde(default = "default_cascade_file")]
        pub cascade_file: PathBuf,
        /// Image pyramid scaling step.
        #[serde(default = "default_scale_factor")]
        pub scale_factor: R64,
        /// Neighbor detections a candidate needs to be reported.
        #[serde(default = "default_min_neighbors")]
        pub min_neighbors: usize,
        /// Lower bound of the minimum face size in pixels.
        #[serde(default = "default_min_face_size")]
        pub min_face_size: usize,
        /// The minimum face size is at least the shorter image side divided by this.
        #[serde(default = "default_min_face_divisor")]
        pub min_face_divisor: NonZeroUsize,
    }

    impl Default for DetectorConfig {
        fn default() -> Self {
            Self {
                cascade_file: default_cascade_file(),
                scale_factor: default_scale_factor(),
                min_neighbors: default_min_neighbors(),
                min_face_size: default_min_face_size(),
                min_face_divisor: default_min_face_divisor(),
            }
        }
    }

    fn default_cascade_file() -> PathBuf {
        "haarcascade_frontalface_default.xml".into()
    }

    fn default_scale_factor() -> R64 {
        r64(1.1)
    }

    fn default_min_neighbors() -> usize {
        10
    }

    fn default_min_face_size() -> usize {
        60
    }

    fn default_min_face_divisor() -> NonZeroUsize {
        NonZeroUsize::new(10).unwrap()
    }
}

mod preprocess {
    use super::*;

    /// Image filtering applied before detection.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PreprocessConfig {
        /// Images taller than this are downscaled before detection.
        #[serde(default)]
        pub max_height: Option<NonZeroUsize>,
        /// Gaussian blur kernel size. Must be odd.
        #[serde(default = "default_blur_kernel")]
        pub blur_kernel: NonZeroUsize,
        #[serde(default = "default_bilateral_diameter")]
        pub bilateral_diameter: usize,
        #[serde(default = "default_bilateral_sigma")]
        pub bilateral_sigma_color: R64,
        #[serde(default = "default_bilateral_sigma")]
        pub bilateral_sigma_space: R64,
    }

    impl Default for PreprocessConfig {
        fn default() -> Self {
            Self {
                max_height: None,
                blur_kernel: default_blur_kernel(),
                bilateral_diameter: default_bilateral_diameter(),
                bilateral_sigma_color: default_bilateral_sigma(),
                bilateral_sigma_space: default_bilateral_sigma(),
            }
        }
    }

    fn default_blur_kernel() -> NonZeroUsize {
        NonZeroUsize::new(5).unwrap()
    }

    fn default_bilateral_diameter() -> usize {
        9
    }

    fn default_bilateral_sigma() -> R64 {
        r64(75.0)
    }
}

mod suppression {
    use super::*;

    /// Duplicate detection removal options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SuppressionConfig {
        /// Candidates overlapping a kept face by more than this ratio are dropped.
        #[serde(default = "default_overlap_threshold")]
        pub overlap_threshold: R64,
    }

    impl Default for SuppressionConfig {
        fn default() -> Self {
            Self {
                overlap_threshold: default_overlap_threshold(),
            }
        }
    }

    fn default_overlap_threshold() -> R64 {
        r64(bbox::DEFAULT_OVERLAP_THRESHOLD)
    }
}

mod input {
    use super::*;

    /// Image discovery options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InputConfig {
        /// Accepted file extensions, compared case-insensitively.
        #[serde(default = "default_extensions")]
        pub extensions: Vec<String>,
    }

    impl Default for InputConfig {
        fn default() -> Self {
            Self {
                extensions: default_extensions(),
            }
        }
    }

    fn default_extensions() -> Vec<String> {
        ["jpg", "jpeg", "png", "bmp", "gif", "tiff"]
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    }
}

mod output {
    use super::*;

    /// Annotation and display options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        /// Box color in BGR order.
        #[serde(default = "default_color")]
        pub color: [u8; 3],
        #[serde(default = "default_thickness")]
        pub thickness: NonZeroUsize,
        #[serde(default = "default_window_name")]
        pub window_name: String,
    }

    impl Default for OutputConfig {
        fn default() -> Self {
            Self {
                color: default_color(),
                thickness: default_thickness(),
                window_name: default_window_name(),
            }
        }
    }

    fn default_color() -> [u8; 3] {
        [255, 0, 0]
    }

    fn default_thickness() -> NonZeroUsize {
        NonZeroUsize::new(2).unwrap()
    }

    fn default_window_name() -> String {
        "Detected Faces".into()
    }
}

fn ensure_fits_i32(name: &str, value: usize) -> Result<()> {
    ensure!(
        i32::try_from(value).is_ok(),
        "{} must be at most {}, but get {}",
        name,
        i32::MAX,
        value
    );
    Ok(())
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_json5(r#"{ version: "0.1.0" }"#).unwrap();

        assert_eq!(
            config.detector.cascade_file,
            Path::new("haarcascade_frontalface_default.xml")
        );
        assert_eq!(config.detector.scale_factor, r64(1.1));
        assert_eq!(config.detector.min_neighbors, 10);
        assert_eq!(config.detector.min_face_size, 60);
        assert_eq!(config.detector.min_face_divisor.get(), 10);
        assert_eq!(config.preprocess.max_height, None);
        assert_eq!(config.preprocess.blur_kernel.get(), 5);
        assert_eq!(config.suppression.overlap_threshold, r64(0.3));
        assert_eq!(config.input.extensions.len(), 6);
        assert_eq!(config.output.color, [255, 0, 0]);
        assert_eq!(config.output.window_name, "Detected Faces");
    }

    #[test]
    fn default_matches_minimal_config() {
        let default = Config::default();
        default.validate().unwrap();
        assert!(CONFIG_VERSION.matches(&default.version));
        assert_eq!(default.suppression.overlap_threshold, r64(0.3));
    }

    #[test]
    fn override_sections() {
        let text = r#"
        {
            version: "0.1.0",
            detector: {
                cascade_file: "cascades/face.xml",
                min_neighbors: 4,
            },
            preprocess: { max_height: 720 },
            suppression: { overlap_threshold: 0.5 },
            input: { extensions: ["png"] },
        }
        "#;
        let config = Config::from_json5(text).unwrap();

        assert_eq!(config.detector.cascade_file, Path::new("cascades/face.xml"));
        assert_eq!(config.detector.min_neighbors, 4);
        assert_eq!(config.detector.min_face_size, 60);
        assert_eq!(config.preprocess.max_height.map(|h| h.get()), Some(720));
        assert_eq!(config.suppression.overlap_threshold, r64(0.5));
        assert_eq!(config.input.extensions, vec!["png".to_string()]);
    }

    #[test]
    fn accept_largest_pixel_values() {
        let text = r#"
        {
            version: "0.1.0",
            detector: { min_face_size: 2147483647 },
            output: { thickness: 2147483647 },
        }
        "#;
        let config = Config::from_json5(text).unwrap();
        assert_eq!(config.detector.min_face_size, i32::MAX as usize);
    }

    #[test]
    fn reject_missing_or_incompatible_version() {
        assert!(Config::from_json5("{}").is_err());
        assert!(Config::from_json5(r#"{ version: "1.0.0" }"#).is_err());
        assert!(Config::from_json5(r#"{ version: "zero" }"#).is_err());
    }

    #[test]
    fn reject_invalid_values() {
        let invalid = [
            r#"{ version: "0.1.0", suppression: { overlap_threshold: 1.0 } }"#,
            r#"{ version: "0.1.0", suppression: { overlap_threshold: 0.0 } }"#,
            r#"{ version: "0.1.0", detector: { scale_factor: 1.0 } }"#,
            r#"{ version: "0.1.0", preprocess: { blur_kernel: 4 } }"#,
            r#"{ version: "0.1.0", preprocess: { blur_kernel: 0 } }"#,
            r#"{ version: "0.1.0", input: { extensions: [] } }"#,
            r#"{ version: "0.1.0", output: { thickness: 0 } }"#,
            r#"{ version: "0.1.0", output: { thickness: 2147483648 } }"#,
            r#"{ version: "0.1.0", detector: { min_neighbors: 3000000000 } }"#,
            r#"{ version: "0.1.0", detector: { min_face_size: 2147483648 } }"#,
            r#"{ version: "0.1.0", detector: { min_face_divisor: 2147483648 } }"#,
            r#"{ version: "0.1.0", preprocess: { max_height: 2147483648 } }"#,
            r#"{ version: "0.1.0", preprocess: { blur_kernel: 2147483649 } }"#,
            r#"{ version: "0.1.0", preprocess: { bilateral_diameter: 2147483648 } }"#,
        ];

        for text in invalid {
            assert!(Config::from_json5(text).is_err(), "accepted {}", text);
        }
    }
}
