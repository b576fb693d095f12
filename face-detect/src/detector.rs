//! Haar cascade face detection followed by overlap suppression.

use crate::{
    common::*,
    config::{Config, DetectorConfig, PreprocessConfig},
};

/// The smallest face the cascade should report on an image of `image_size`.
///
/// Values beyond the `i32` range saturate.
pub fn min_face_size(image_size: &HW<i32>, config: &DetectorConfig) -> i32 {
    let floor = i32::try_from(config.min_face_size).unwrap_or(i32::MAX);
    let divisor = i32::try_from(config.min_face_divisor.get()).unwrap_or(i32::MAX);
    floor.max(image_size.min_side() / divisor)
}

/// Map boxes found on a resized image through `transform`, rounding each
/// coordinate to the nearest pixel.
pub fn restore_boxes(faces: &[XYWH<i32>], transform: &Transform<f64>) -> Vec<XYWH<i32>> {
    faces
        .iter()
        .map(|face| {
            let [x, y, w, h] = (transform * &face.to_f64()).xywh();
            XYWH::from_xywh_clamped([
                x.round() as i32,
                y.round() as i32,
                w.round() as i32,
                h.round() as i32,
            ])
        })
        .collect()
}

pub struct FaceDetector {
    classifier: CascadeClassifier,
    detector: DetectorConfig,
    preprocess: PreprocessConfig,
    suppressor: OverlapSuppressor,
}

impl FaceDetector {
    pub fn new(config: &Config) -> Result<Self> {
        let Config {
            detector,
            preprocess,
            suppression,
            ..
        } = config;
        config.validate()?;

        let cascade_file = resolve_cascade_file(&detector.cascade_file)?;
        let classifier = CascadeClassifier::new(&cascade_file)
            .with_context(|| format!("failed to load face cascade from '{}'", cascade_file))?;
        ensure!(
            !classifier.empty()?,
            "error loading face cascade from '{}'",
            cascade_file
        );
        info!("loaded face cascade '{}'", cascade_file);

        let suppressor = OverlapSuppressor::new(suppression.overlap_threshold.raw())?;

        Ok(Self {
            classifier,
            detector: detector.clone(),
            preprocess: preprocess.clone(),
            suppressor,
        })
    }

    /// Detect faces and return their boxes in the coordinates of `image`, in
    /// the order the cascade reported them, with duplicates removed.
    pub fn detect(&mut self, image: &Mat) -> Result<Vec<XYWH<i32>>> {
        let image_size: HW<i32> = image.size()?.try_into()?;

        let max_height = self
            .preprocess
            .max_height
            .map(|max_height| i32::try_from(max_height.get()))
            .transpose()?;

        let resized;
        let target_size = max_height.and_then(|max_height| image_size.fit_height(max_height));
        let (input, restore) = match target_size {
            Some(target_size) => {
                debug!(
                    "downscale image from {}x{} to {}x{}",
                    image_size.w(),
                    image_size.h(),
                    target_size.w(),
                    target_size.h()
                );
                let mut output = Mat::default();
                imgproc::resize(
                    image,
                    &mut output,
                    Size::from(&target_size),
                    0.0,
                    0.0,
                    imgproc::INTER_AREA,
                )?;
                resized = output;

                let transform =
                    Transform::from_sizes_exact(&image_size.to_f64(), &target_size.to_f64());
                (&resized, Some(transform.inverse()))
            }
            None => (image, None),
        };

        let filtered = self.filter(input)?;
        let candidates = self.detect_candidates(&filtered)?;
        let faces = self.suppressor.suppress(candidates);

        let faces = match restore {
            Some(transform) => restore_boxes(&faces, &transform),
            None => faces,
        };

        Ok(faces)
    }

    /// Grayscale, blur, equalize and edge-preserving smoothing.
    fn filter(&self, image: &Mat) -> Result<Mat> {
        let PreprocessConfig {
            blur_kernel,
            bilateral_diameter,
            bilateral_sigma_color,
            bilateral_sigma_space,
            ..
        } = self.preprocess;
        let blur_kernel = i32::try_from(blur_kernel.get())?;

        let mut gray = Mat::default();
        imgproc::cvt_color(image, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            &gray,
            &mut blurred,
            Size::new(blur_kernel, blur_kernel),
            0.0,
            0.0,
            core_cv::BORDER_DEFAULT,
        )?;

        let mut equalized = Mat::default();
        imgproc::equalize_hist(&blurred, &mut equalized)?;

        let mut filtered = Mat::default();
        imgproc::bilateral_filter(
            &equalized,
            &mut filtered,
            i32::try_from(bilateral_diameter)?,
            bilateral_sigma_color.raw(),
            bilateral_sigma_space.raw(),
            core_cv::BORDER_DEFAULT,
        )?;

        Ok(filtered)
    }

    fn detect_candidates(&mut self, gray: &Mat) -> Result<Vec<XYWH<i32>>> {
        let image_size: HW<i32> = gray.size()?.try_into()?;
        let min_size = min_face_size(&image_size, &self.detector);

        let mut objects = Vector::<core_cv::Rect>::new();
        self.classifier.detect_multi_scale(
            gray,
            &mut objects,
            self.detector.scale_factor.raw(),
            i32::try_from(self.detector.min_neighbors)?,
            objdetect::CASCADE_SCALE_IMAGE,
            Size::new(min_size, min_size),
            Size::default(),
        )?;

        let candidates: Vec<XYWH<i32>> = objects.iter().map(XYWH::<i32>::from).collect();
        debug!(
            "cascade reported {} candidates with minimum size {}",
            candidates.len(),
            min_size
        );
        Ok(candidates)
    }
}

/// Use the path as given if it exists, otherwise search the OpenCV sample data.
fn resolve_cascade_file(path: &Path) -> Result<String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| format_err!("the path '{}' is not valid UTF-8", path.display()))?;

    if path.exists() {
        return Ok(path_str.to_string());
    }

    let found = core_cv::find_file(path_str, false, true)?;
    if found.is_empty() {
        bail!("unable to find face cascade file '{}'", path.display());
    }
    Ok(found)
}
