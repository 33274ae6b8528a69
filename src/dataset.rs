//! Paired image/annotation collections.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CircleEvalError, Result};

/// File extensions recognised as images by [`CoinDataset::from_directory`].
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Ordered image paths and their annotation files, paired by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinDataset {
    pub image_paths: Vec<PathBuf>,
    pub annotation_paths: Vec<PathBuf>,
}

impl CoinDataset {
    /// Create a dataset from parallel path lists.
    ///
    /// # Errors
    ///
    /// Returns `DatasetMismatch` if the lists differ in length.
    pub fn new(image_paths: Vec<PathBuf>, annotation_paths: Vec<PathBuf>) -> Result<Self> {
        if image_paths.len() != annotation_paths.len() {
            return Err(CircleEvalError::DatasetMismatch(format!(
                "{} images but {} annotation files",
                image_paths.len(),
                annotation_paths.len()
            )));
        }
        Ok(Self {
            image_paths,
            annotation_paths,
        })
    }

    /// Scan `root/images` for images and pair each with `root/labels/<stem>.json`.
    ///
    /// Images are sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if a directory cannot be read and `DatasetMismatch`
    /// if an image has no label file.
    pub fn from_directory<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let images_dir = root.join("images");
        let labels_dir = root.join("labels");

        let mut image_paths = Vec::new();
        for entry in fs::read_dir(&images_dir)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                image_paths.push(path);
            }
        }
        image_paths.sort();

        let mut annotation_paths = Vec::with_capacity(image_paths.len());
        for image in &image_paths {
            let label = image
                .file_stem()
                .map(|stem| {
                    let mut name = stem.to_os_string();
                    name.push(".json");
                    labels_dir.join(name)
                })
                .filter(|label| label.is_file())
                .ok_or_else(|| {
                    CircleEvalError::DatasetMismatch(format!(
                        "no label file in {} for image {}",
                        labels_dir.display(),
                        image.display()
                    ))
                })?;
            annotation_paths.push(label);
        }

        Self::new(image_paths, annotation_paths)
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.image_paths.len()
    }

    /// Whether the dataset holds no images.
    pub fn is_empty(&self) -> bool {
        self.image_paths.is_empty()
    }

    /// Iterate over `(image, annotation)` pairs in dataset order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.image_paths
            .iter()
            .zip(&self.annotation_paths)
            .map(|(image, annotation)| (image.as_path(), annotation.as_path()))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mismatch() {
        let result = CoinDataset::new(vec![PathBuf::from("a.jpg")], vec![]);
        assert!(matches!(result, Err(CircleEvalError::DatasetMismatch(_))));
    }

    #[test]
    fn test_pairs() {
        let dataset = CoinDataset::new(
            vec![PathBuf::from("1.jpg"), PathBuf::from("2.jpg")],
            vec![PathBuf::from("1.json"), PathBuf::from("2.json")],
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());

        let pairs: Vec<_> = dataset.pairs().collect();
        assert_eq!(pairs[1], (Path::new("2.jpg"), Path::new("2.json")));
    }

    #[test]
    fn test_from_directory() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("images")).unwrap();
        fs::create_dir(root.path().join("labels")).unwrap();
        for name in ["2.JPG", "1.png", "notes.txt"] {
            fs::write(root.path().join("images").join(name), b"").unwrap();
        }
        for name in ["1.json", "2.json"] {
            fs::write(root.path().join("labels").join(name), b"{}").unwrap();
        }

        let dataset = CoinDataset::from_directory(root.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.image_paths[0].ends_with("1.png"));
        assert!(dataset.annotation_paths[0].ends_with("1.json"));
        assert!(dataset.image_paths[1].ends_with("2.JPG"));
        assert!(dataset.annotation_paths[1].ends_with("2.json"));
    }

    #[test]
    fn test_from_directory_missing_label() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("images")).unwrap();
        fs::create_dir(root.path().join("labels")).unwrap();
        fs::write(root.path().join("images").join("7.jpg"), b"").unwrap();

        let result = CoinDataset::from_directory(root.path());
        assert!(matches!(result, Err(CircleEvalError::DatasetMismatch(_))));
    }
}
