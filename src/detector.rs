//! Detector collaborator interface.
//!
//! The library never runs a model itself. Anything that maps an image path to
//! a list of predicted circles can be plugged in, including plain closures.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::DetectorError;
use crate::types::Circle;

/// Produces predicted circles for an image.
pub trait Detector {
    /// Extra output returned next to the predictions; evaluation drops it.
    type Auxiliary;

    /// Run detection on the image at `image_path`.
    fn detect(
        &self,
        image_path: &Path,
    ) -> std::result::Result<(Vec<Circle>, Self::Auxiliary), DetectorError>;
}

impl<F, A> Detector for F
where
    F: Fn(&Path) -> std::result::Result<(Vec<Circle>, A), DetectorError>,
{
    type Auxiliary = A;

    fn detect(&self, image_path: &Path) -> std::result::Result<(Vec<Circle>, A), DetectorError> {
        self(image_path)
    }
}

/// Detector that replays predictions stored on disk.
///
/// For an image `some/dir/40.jpg` it reads `<predictions_dir>/40.json`, which
/// must hold a JSON array of `[x, y, radius]` triples.
#[derive(Debug, Clone)]
pub struct PredictionFileDetector {
    predictions_dir: PathBuf,
}

impl PredictionFileDetector {
    /// Create a detector reading from `predictions_dir`.
    pub fn new<P: Into<PathBuf>>(predictions_dir: P) -> Self {
        Self {
            predictions_dir: predictions_dir.into(),
        }
    }

    /// Path of the predictions file used for `image_path`.
    pub fn predictions_path(&self, image_path: &Path) -> Option<PathBuf> {
        let stem = image_path.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".json");
        Some(self.predictions_dir.join(name))
    }
}

impl Detector for PredictionFileDetector {
    type Auxiliary = PathBuf;

    fn detect(
        &self,
        image_path: &Path,
    ) -> std::result::Result<(Vec<Circle>, PathBuf), DetectorError> {
        let path = self
            .predictions_path(image_path)
            .ok_or_else(|| format!("image path {} has no file name", image_path.display()))?;
        let file = File::open(&path)
            .map_err(|e| format!("cannot open predictions {}: {}", path.display(), e))?;
        let triples: Vec<[f64; 3]> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("cannot parse predictions {}: {}", path.display(), e))?;

        let circles = triples
            .into_iter()
            .map(|[x, y, radius]| Circle::new(x, y, radius))
            .collect();
        Ok((circles, path))
    }
}
