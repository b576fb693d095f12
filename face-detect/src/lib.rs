mod common;
pub mod config;
pub mod detector;
pub mod input;
pub mod output;

use crate::{
    common::*,
    config::Config,
    detector::FaceDetector,
    output::{OutputMode, OutputSink},
};

/// Counters of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub images: usize,
    pub images_with_faces: usize,
    pub faces: usize,
    pub failures: usize,
}

impl Summary {
    fn record(&mut self, result: &Result<usize>) {
        self.images += 1;
        match *result {
            Ok(0) => {}
            Ok(num_faces) => {
                self.images_with_faces += 1;
                self.faces += num_faces;
            }
            Err(_) => self.failures += 1,
        }
    }
}

/// Detect faces in every image under `input_dir`.
///
/// Failures on individual images are logged and counted, and do not stop the
/// run. An invalid input directory or an unusable cascade is fatal.
pub fn start(config: &Config, input_dir: &Path, mode: OutputMode) -> Result<Summary> {
    let paths = input::scan_images(input_dir, &config.input)?;
    let mut detector = FaceDetector::new(config)?;
    let sink = OutputSink::new(mode, &config.output);

    let summary = paths.iter().fold(Summary::default(), |mut summary, path| {
        let result = process_image(&mut detector, &sink, path);
        if let Err(err) = &result {
            warn!("{:#}", err);
        }
        summary.record(&result);
        summary
    });

    info!(
        "processing completed: {} images, {} with faces, {} faces, {} failures",
        summary.images, summary.images_with_faces, summary.faces, summary.failures
    );
    Ok(summary)
}

fn process_image(detector: &mut FaceDetector, sink: &OutputSink, path: &Path) -> Result<usize> {
    info!("processing image '{}'", path.display());

    let path_str = path
        .to_str()
        .ok_or_else(|| format_err!("the path '{}' is not valid UTF-8", path.display()))?;
    let mut image = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    ensure!(
        image.rows() > 0 && image.cols() > 0,
        "could not open or find the image '{}'",
        path.display()
    );

    let faces = detector
        .detect(&image)
        .with_context(|| format!("face detection failed on '{}'", path.display()))?;

    if faces.is_empty() {
        info!("no faces detected");
        return Ok(0);
    }

    info!("faces detected: {}", faces.len());
    for face in &faces {
        info!(
            "face at: x={}, y={}, width={}, height={}",
            face.x(),
            face.y(),
            face.w(),
            face.h()
        );
    }

    sink.annotate(&mut image, &faces)?;
    sink.emit(path, &image)?;

    Ok(faces.len())
}
