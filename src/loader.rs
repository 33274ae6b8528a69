//! JSON loading utilities for ground-truth annotation files.
//!
//! Annotation files follow the LabelMe layout: an object with a `"shapes"`
//! list, each shape holding two `[x, y]` points. The first point is the circle
//! center and the radius is half the distance between the two points.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CircleEvalError, Result};
use crate::types::Circle;

/// Source of ground-truth circles for an annotation path.
pub trait AnnotationLoader {
    /// Load the ground-truth circles described by the file at `path`.
    fn load(&self, path: &Path) -> Result<Vec<Circle>>;
}

/// Loader for LabelMe-style JSON annotation files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelMeLoader;

impl AnnotationLoader for LabelMeLoader {
    fn load(&self, path: &Path) -> Result<Vec<Circle>> {
        load_from_file(path)
    }
}

impl<F> AnnotationLoader for F
where
    F: Fn(&Path) -> Result<Vec<Circle>>,
{
    fn load(&self, path: &Path) -> Result<Vec<Circle>> {
        self(path)
    }
}

#[derive(Debug, Deserialize)]
struct AnnotationFile {
    shapes: Vec<Shape>,
}

#[derive(Debug, Deserialize)]
struct Shape {
    #[serde(default)]
    label: Option<String>,
    points: Vec<Vec<f64>>,
}

/// Load ground-truth circles from an annotation JSON file.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be opened and `AnnotationParse` if
/// its content does not follow the expected layout.
///
/// # Example
///
/// ```no_run
/// use circle_eval::loader::load_from_file;
///
/// let circles = load_from_file("dataset/labels/40.json").unwrap();
/// println!("Loaded {} annotated coins", circles.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Circle>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let file: AnnotationFile = serde_json::from_reader(reader).map_err(|e| {
        CircleEvalError::AnnotationParse(format!("{}: {}", path.display(), e))
    })?;

    file.into_circles().map_err(|e| match e {
        CircleEvalError::AnnotationParse(msg) => {
            CircleEvalError::AnnotationParse(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Load ground-truth circles from an annotation JSON string.
///
/// # Example
///
/// ```
/// use circle_eval::loader::load_from_string;
///
/// let json = r#"{
///     "shapes": [
///         {"label": "coin", "points": [[10.0, 10.0], [10.0, 16.0]]}
///     ]
/// }"#;
/// let circles = load_from_string(json).unwrap();
/// assert_eq!(circles[0].radius, 3.0);
/// ```
pub fn load_from_string(json_str: &str) -> Result<Vec<Circle>> {
    let file: AnnotationFile = serde_json::from_str(json_str)
        .map_err(|e| CircleEvalError::AnnotationParse(e.to_string()))?;
    file.into_circles()
}

impl AnnotationFile {
    fn into_circles(self) -> Result<Vec<Circle>> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| shape_to_circle(index, shape))
            .collect()
    }
}

/// Convert a two-point shape into a circle.
fn shape_to_circle(index: usize, shape: &Shape) -> Result<Circle> {
    let describe = || match &shape.label {
        Some(label) => format!("shape {} ({})", index, label),
        None => format!("shape {}", index),
    };

    if shape.points.len() != 2 {
        return Err(CircleEvalError::AnnotationParse(format!(
            "{} has {} points, expected 2",
            describe(),
            shape.points.len()
        )));
    }

    let mut coords = [[0.0; 2]; 2];
    for (slot, point) in coords.iter_mut().zip(&shape.points) {
        match point.as_slice() {
            [x, y] => *slot = [*x, *y],
            _ => {
                return Err(CircleEvalError::AnnotationParse(format!(
                    "{} has a point with {} coordinates, expected 2",
                    describe(),
                    point.len()
                )))
            }
        }
    }

    Ok(Circle::from_points(coords[0], coords[1]))
}
