//! Annotation and delivery of processed images.

use crate::{common::*, config::OutputConfig};

/// Where annotated images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write each annotated image into the directory, keeping its file name.
    Save { dir: PathBuf },
    /// Show each annotated image and wait for a key press.
    Display,
}

#[derive(Debug, Clone)]
pub struct OutputSink {
    mode: OutputMode,
    config: OutputConfig,
}

impl OutputSink {
    pub fn new(mode: OutputMode, config: &OutputConfig) -> Self {
        Self {
            mode,
            config: config.clone(),
        }
    }

    pub fn mode(&self) -> &OutputMode {
        &self.mode
    }

    pub fn annotate(&self, image: &mut Mat, faces: &[XYWH<i32>]) -> Result<()> {
        let [b, g, r] = self.config.color;
        let color = Scalar::new(b as f64, g as f64, r as f64, 0.0);
        let thickness = i32::try_from(self.config.thickness.get())?;

        for face in faces {
            imgproc::rectangle(
                image,
                core_cv::Rect::from(face),
                color,
                thickness,
                imgproc::LINE_8,
                0,
            )?;
        }

        Ok(())
    }

    /// Save or show the annotated image that was loaded from `source`.
    pub fn emit(&self, source: &Path, image: &Mat) -> Result<()> {
        match &self.mode {
            OutputMode::Save { dir } => {
                let save_path = save_path(dir, source)?;
                fs::create_dir_all(dir).with_context(|| {
                    format!("failed to create save directory '{}'", dir.display())
                })?;

                let save_path_str = save_path.to_str().ok_or_else(|| {
                    format_err!("the path '{}' is not valid UTF-8", save_path.display())
                })?;
                let ok = imgcodecs::imwrite(save_path_str, image, &Vector::new())?;
                ensure!(
                    ok,
                    "failed to save the image to '{}'",
                    save_path.display()
                );
                info!("saved processed image to '{}'", save_path.display());
            }
            OutputMode::Display => {
                highgui::imshow(&self.config.window_name, image)?;
                info!("press any key to continue to the next image");
                highgui::wait_key(0)?;
            }
        }

        Ok(())
    }
}

/// The output path for `source`: its file name placed directly in `dir`.
pub fn save_path(dir: &Path, source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| format_err!("the path '{}' has no file name", source.display()))?;
    Ok(dir.join(file_name))
}
