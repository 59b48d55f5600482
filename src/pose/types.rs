//! Core types for pose input
//!
//! A pose sequence is the per-frame output of the pose-estimation
//! collaborator: one entry per sampled video frame, either a landmark list
//! or an absence marker when detection failed.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Visibility assumed when the input omits it
const DEFAULT_VISIBILITY: f64 = 1.0;

fn default_visibility() -> f64 {
    DEFAULT_VISIBILITY
}

/// A single estimated body-joint position (normalized image space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LandmarkRepr")]
pub struct Landmark {
    /// Horizontal position, 0 = left edge
    pub x: f64,
    /// Vertical position, 0 = top edge (grows downward)
    pub y: f64,
    /// Relative depth
    pub z: f64,
    /// Detection confidence
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Landmark at an image position with zero depth and full visibility
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, DEFAULT_VISIBILITY)
    }
}

/// Accepted wire forms: `[x, y, z, visibility]` or `{x, y, z, visibility}`
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkRepr {
    Array(Vec<f64>),
    Object {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
        #[serde(default = "default_visibility")]
        visibility: f64,
    },
}

impl TryFrom<LandmarkRepr> for Landmark {
    type Error = String;

    fn try_from(repr: LandmarkRepr) -> Result<Self, Self::Error> {
        match repr {
            LandmarkRepr::Array(values) => match values.as_slice() {
                [x, y] => Ok(Landmark::new(*x, *y, 0.0, DEFAULT_VISIBILITY)),
                [x, y, z] => Ok(Landmark::new(*x, *y, *z, DEFAULT_VISIBILITY)),
                [x, y, z, visibility, ..] => Ok(Landmark::new(*x, *y, *z, *visibility)),
                _ => Err(format!(
                    "landmark array needs at least 2 values, got {}",
                    values.len()
                )),
            },
            LandmarkRepr::Object { x, y, z, visibility } => Ok(Landmark::new(x, y, z, visibility)),
        }
    }
}

/// Detection result for one sampled frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Landmark>>", into = "Option<Vec<Landmark>>")]
pub enum PoseFrame {
    /// Landmarks in anatomical index order
    Detected(Vec<Landmark>),
    /// No pose found in this frame
    Absent,
}

impl PoseFrame {
    /// Landmark list, if a pose was detected
    pub fn landmarks(&self) -> Option<&[Landmark]> {
        match self {
            PoseFrame::Detected(landmarks) => Some(landmarks),
            PoseFrame::Absent => None,
        }
    }

    /// Landmark at an anatomical index, if present
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks().and_then(|l| l.get(index))
    }

    /// Number of landmarks carried (0 when absent)
    pub fn landmark_count(&self) -> usize {
        self.landmarks().map_or(0, <[Landmark]>::len)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, PoseFrame::Absent)
    }

    /// Whether the frame can be indexed up to `count - 1`
    pub fn has_at_least(&self, count: usize) -> bool {
        count > 0 && self.landmark_count() >= count
    }
}

impl From<Option<Vec<Landmark>>> for PoseFrame {
    fn from(value: Option<Vec<Landmark>>) -> Self {
        match value {
            Some(landmarks) => PoseFrame::Detected(landmarks),
            None => PoseFrame::Absent,
        }
    }
}

impl From<PoseFrame> for Option<Vec<Landmark>> {
    fn from(frame: PoseFrame) -> Self {
        match frame {
            PoseFrame::Detected(landmarks) => Some(landmarks),
            PoseFrame::Absent => None,
        }
    }
}

/// Ordered per-frame detections; index = frame number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseSequence {
    frames: Vec<PoseFrame>,
}

impl PoseSequence {
    pub fn new(frames: Vec<PoseFrame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at a 0-based frame number
    pub fn frame(&self, index: usize) -> Option<&PoseFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[PoseFrame] {
        &self.frames
    }

    /// Number of frames with a detected pose
    pub fn detected_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_absent()).count()
    }

    /// Parse a sequence from its JSON form
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a sequence from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let sequence = Self::from_json_str(&content)?;
        if sequence.detected_count() == 0 {
            tracing::warn!(
                path = %path.display(),
                frames = sequence.len(),
                "Pose sequence has no detected frames"
            );
        }
        Ok(sequence)
    }

    /// Save a sequence as JSON
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl FromIterator<PoseFrame> for PoseSequence {
    fn from_iter<I: IntoIterator<Item = PoseFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_landmark_from_array() {
        let lm: Landmark = serde_json::from_str("[0.1, 0.2, -0.3, 0.9]").unwrap();
        assert_eq!(lm, Landmark::new(0.1, 0.2, -0.3, 0.9));
    }

    #[test]
    fn test_landmark_from_short_array() {
        let lm: Landmark = serde_json::from_str("[0.5, 0.6]").unwrap();
        assert_eq!(lm.z, 0.0);
        assert_eq!(lm.visibility, 1.0);
    }

    #[test]
    fn test_landmark_from_object() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.4, "y": 0.7}"#).unwrap();
        assert_eq!(lm, Landmark::at(0.4, 0.7));
    }

    #[test]
    fn test_landmark_array_too_short() {
        let result: Result<Landmark, _> = serde_json::from_str("[0.5]");
        assert!(result.is_err());
    }

    #[test]
    fn test_null_frame_is_absent() {
        let seq = PoseSequence::from_json_str("[null, [[0.5, 0.5, 0.0, 1.0]], null]").unwrap();
        assert_eq!(seq.len(), 3);
        assert!(seq.frame(0).unwrap().is_absent());
        assert_eq!(seq.frame(1).unwrap().landmark_count(), 1);
        assert_eq!(seq.detected_count(), 1);
    }

    #[test]
    fn test_has_at_least() {
        let frame = PoseFrame::Detected(vec![Landmark::at(0.0, 0.0); 17]);
        assert!(frame.has_at_least(17));
        assert!(!frame.has_at_least(27));
        assert!(!PoseFrame::Absent.has_at_least(1));
        assert!(!PoseFrame::Detected(vec![]).has_at_least(0));
    }

    #[test]
    fn test_landmark_lookup_out_of_range() {
        let frame = PoseFrame::Detected(vec![Landmark::at(0.1, 0.2)]);
        assert!(frame.landmark(0).is_some());
        assert!(frame.landmark(5).is_none());
        assert!(PoseFrame::Absent.landmark(0).is_none());
    }

    #[test]
    fn test_sequence_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("poses.json");

        let original: PoseSequence = vec![
            PoseFrame::Detected(vec![Landmark::new(0.1, 0.2, 0.3, 0.4)]),
            PoseFrame::Absent,
        ]
        .into_iter()
        .collect();

        original.save(&path).expect("Failed to save sequence");
        let loaded = PoseSequence::load(&path).expect("Failed to load sequence");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PoseSequence::load(Path::new("/tmp/nonexistent_poses_12345.json"));
        assert!(result.is_err());
    }
}
