//! Image file discovery.

use crate::{common::*, config::InputConfig};

/// Check whether the path has one of the accepted extensions, ignoring case.
/// Extensions may be written with or without the leading dot.
pub fn is_image_file(path: &Path, extensions: &[String]) -> bool {
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext,
        None => return false,
    };

    extensions
        .iter()
        .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Recursively list image files under `dir`, sorted by path.
pub fn scan_images(dir: &Path, config: &InputConfig) -> Result<Vec<PathBuf>> {
    ensure!(
        dir.is_dir(),
        "the provided path '{}' is not a valid directory",
        dir.display()
    );

    let dir_str = dir
        .to_str()
        .ok_or_else(|| format_err!("the path '{}' is not valid UTF-8", dir.display()))?;
    let pattern = format!("{}/**/*", glob::Pattern::escape(dir_str));

    let paths: Vec<_> = glob::glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("skip unreadable entry: {}", err);
                None
            }
        })
        .filter(|path| path.is_file() && is_image_file(path, &config.extensions))
        .sorted()
        .collect();

    debug!(
        "found {} image files under '{}'",
        paths.len(),
        dir.display()
    );
    Ok(paths)
}
