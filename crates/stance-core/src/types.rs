//! Fundamental types for the Stance system.

use std::ops::Index;

use chrono::{DateTime, Utc};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// 3D position in sensor space (metres, Y up, Z away from the sensor)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.to_nalgebra() - other.to_nalgebra()).norm()
    }
}

/// Point on the render surface (pixels, origin at the top-left corner)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// The 20 joints of the depth-camera skeleton topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum JointType {
    HipCenter = 0,
    Spine = 1,
    ShoulderCenter = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
}

impl JointType {
    pub const COUNT: usize = 20;

    /// Every joint in index order
    pub const ALL: [JointType; JointType::COUNT] = [
        JointType::HipCenter,
        JointType::Spine,
        JointType::ShoulderCenter,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-joint tracking confidence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointTrackingState {
    #[default]
    NotTracked,
    /// Position estimated from neighbouring joints
    Inferred,
    Tracked,
}

/// A single joint reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub joint_type: JointType,
    pub position: Position3D,
    pub tracking_state: JointTrackingState,
}

impl Joint {
    pub fn new(
        joint_type: JointType,
        position: Position3D,
        tracking_state: JointTrackingState,
    ) -> Self {
        Self {
            joint_type,
            position,
            tracking_state,
        }
    }

    pub fn untracked(joint_type: JointType) -> Self {
        Self::new(joint_type, Position3D::origin(), JointTrackingState::NotTracked)
    }

    pub fn is_tracked(&self) -> bool {
        self.tracking_state == JointTrackingState::Tracked
    }
}

/// Whole-body tracking state reported by the sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkeletonTrackingState {
    #[default]
    NotTracked,
    /// Only the body centre is known, no joints
    PositionOnly,
    Tracked,
}

/// Edge of the sensor's field of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Edges the body extends beyond, any combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippedEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ClippedEdges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, edge: FrameEdge) -> Self {
        match edge {
            FrameEdge::Top => self.top = true,
            FrameEdge::Bottom => self.bottom = true,
            FrameEdge::Left => self.left = true,
            FrameEdge::Right => self.right = true,
        }
        self
    }

    pub fn contains(&self, edge: FrameEdge) -> bool {
        match edge {
            FrameEdge::Top => self.top,
            FrameEdge::Bottom => self.bottom,
            FrameEdge::Left => self.left,
            FrameEdge::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.top || self.bottom || self.left || self.right)
    }

    /// Flagged edges in Bottom, Top, Left, Right order
    pub fn iter(&self) -> impl Iterator<Item = FrameEdge> + '_ {
        [FrameEdge::Bottom, FrameEdge::Top, FrameEdge::Left, FrameEdge::Right]
            .into_iter()
            .filter(|edge| self.contains(*edge))
    }
}

/// One detected body in one frame.
///
/// Holds exactly one [`Joint`] per [`JointType`], stored at the joint's index.
/// There is no way to mutate a sample after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SkeletonRecord", into = "SkeletonRecord")]
pub struct SkeletonSample {
    tracking_id: u32,
    tracking_state: SkeletonTrackingState,
    position: Position3D,
    clipped_edges: ClippedEdges,
    joints: [Joint; JointType::COUNT],
}

impl SkeletonSample {
    /// Build a sample from an unordered joint list.
    ///
    /// Every joint type must appear exactly once. The body position defaults
    /// to the hip centre.
    pub fn from_joints(
        tracking_id: u32,
        tracking_state: SkeletonTrackingState,
        joints: impl IntoIterator<Item = Joint>,
    ) -> Result<Self> {
        let mut slots = JointType::ALL.map(Joint::untracked);
        let mut seen = [false; JointType::COUNT];
        let mut count = 0;

        for joint in joints {
            let idx = joint.joint_type.index();
            if seen[idx] {
                return Err(Error::DuplicateJoint(joint.joint_type));
            }
            seen[idx] = true;
            slots[idx] = joint;
            count += 1;
        }

        if count != JointType::COUNT {
            return Err(Error::IncompleteSkeleton {
                expected: JointType::COUNT,
                actual: count,
            });
        }

        Ok(Self {
            tracking_id,
            tracking_state,
            position: slots[JointType::HipCenter.index()].position,
            clipped_edges: ClippedEdges::none(),
            joints: slots,
        })
    }

    /// Build a sample by asking `f` for each joint's position and state
    pub fn from_fn<F>(tracking_id: u32, tracking_state: SkeletonTrackingState, mut f: F) -> Self
    where
        F: FnMut(JointType) -> (Position3D, JointTrackingState),
    {
        let joints = JointType::ALL.map(|joint_type| {
            let (position, state) = f(joint_type);
            Joint::new(joint_type, position, state)
        });

        Self {
            tracking_id,
            tracking_state,
            position: joints[JointType::HipCenter.index()].position,
            clipped_edges: ClippedEdges::none(),
            joints,
        }
    }

    /// A body whose centre is known but whose joints are not
    pub fn position_only(tracking_id: u32, position: Position3D) -> Self {
        Self {
            tracking_id,
            tracking_state: SkeletonTrackingState::PositionOnly,
            position,
            clipped_edges: ClippedEdges::none(),
            joints: JointType::ALL.map(Joint::untracked),
        }
    }

    pub fn with_position(mut self, position: Position3D) -> Self {
        self.position = position;
        self
    }

    pub fn with_clipped_edges(mut self, clipped_edges: ClippedEdges) -> Self {
        self.clipped_edges = clipped_edges;
        self
    }

    pub fn tracking_id(&self) -> u32 {
        self.tracking_id
    }

    pub fn tracking_state(&self) -> SkeletonTrackingState {
        self.tracking_state
    }

    pub fn position(&self) -> Position3D {
        self.position
    }

    pub fn clipped_edges(&self) -> ClippedEdges {
        self.clipped_edges
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type.index()]
    }

    pub fn is_joint_tracked(&self, joint_type: JointType) -> bool {
        self.joint(joint_type).is_tracked()
    }

    /// Check that each of `joint_types` is tracked, naming the first that isn't
    pub fn require_tracked(&self, joint_types: &[JointType]) -> Result<()> {
        match joint_types.iter().find(|jt| !self.is_joint_tracked(**jt)) {
            Some(jt) => Err(Error::MissingJoint(*jt)),
            None => Ok(()),
        }
    }
}

impl Index<JointType> for SkeletonSample {
    type Output = Joint;

    fn index(&self, joint_type: JointType) -> &Joint {
        self.joint(joint_type)
    }
}

/// Wire form of a skeleton; validated on the way in
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SkeletonRecord {
    tracking_id: u32,
    tracking_state: SkeletonTrackingState,
    #[serde(default)]
    position: Option<Position3D>,
    #[serde(default)]
    clipped_edges: ClippedEdges,
    #[serde(default)]
    joints: Vec<Joint>,
}

impl TryFrom<SkeletonRecord> for SkeletonSample {
    type Error = Error;

    fn try_from(record: SkeletonRecord) -> Result<Self> {
        let sample = if record.joints.is_empty()
            && record.tracking_state != SkeletonTrackingState::Tracked
        {
            let mut sample =
                SkeletonSample::position_only(record.tracking_id, record.position.unwrap_or_default());
            sample.tracking_state = record.tracking_state;
            sample
        } else {
            let sample =
                SkeletonSample::from_joints(record.tracking_id, record.tracking_state, record.joints)?;
            match record.position {
                Some(position) => sample.with_position(position),
                None => sample,
            }
        };

        Ok(sample.with_clipped_edges(record.clipped_edges))
    }
}

impl From<SkeletonSample> for SkeletonRecord {
    fn from(sample: SkeletonSample) -> Self {
        Self {
            tracking_id: sample.tracking_id,
            tracking_state: sample.tracking_state,
            position: Some(sample.position),
            clipped_edges: sample.clipped_edges,
            joints: sample.joints.to_vec(),
        }
    }
}

/// Everything the sensor delivered for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonFrame {
    pub frame_number: u64,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub skeletons: Vec<SkeletonSample>,
}

impl SkeletonFrame {
    pub fn new(frame_number: u64, timestamp: Timestamp, skeletons: Vec<SkeletonSample>) -> Self {
        Self {
            frame_number,
            timestamp,
            skeletons,
        }
    }

    /// Skeletons with full joint tracking
    pub fn tracked_skeletons(&self) -> impl Iterator<Item = &SkeletonSample> {
        self.skeletons
            .iter()
            .filter(|s| s.tracking_state() == SkeletonTrackingState::Tracked)
    }
}

/// Sensor skeleton tracking mode, toggled by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Full 20-joint body
    #[default]
    Standing,
    /// Upper body only; lower joints are reported as not tracked
    Seated,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tracked_joints() -> Vec<Joint> {
        JointType::ALL
            .iter()
            .map(|jt| {
                Joint::new(
                    *jt,
                    Position3D::new(jt.index() as f64 * 0.1, 0.0, 2.0),
                    JointTrackingState::Tracked,
                )
            })
            .collect()
    }

    #[test]
    fn test_joint_type_roundtrip() {
        for i in 0..JointType::COUNT as u8 {
            let jt = JointType::from_index(i).unwrap();
            assert_eq!(jt as u8, i);
        }
        assert!(JointType::from_index(JointType::COUNT as u8).is_none());
    }

    #[test]
    fn test_from_joints_orders_by_type() {
        let mut joints = all_tracked_joints();
        joints.reverse();

        let sample =
            SkeletonSample::from_joints(7, SkeletonTrackingState::Tracked, joints).unwrap();

        for jt in JointType::ALL {
            assert_eq!(sample[jt].joint_type, jt);
            assert!((sample[jt].position.x - jt.index() as f64 * 0.1).abs() < 1e-12);
        }
        assert_eq!(sample.position(), sample[JointType::HipCenter].position);
    }

    #[test]
    fn test_from_joints_rejects_missing() {
        let mut joints = all_tracked_joints();
        joints.pop();

        let err =
            SkeletonSample::from_joints(1, SkeletonTrackingState::Tracked, joints).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteSkeleton {
                expected: 20,
                actual: 19
            }
        ));
    }

    #[test]
    fn test_from_joints_rejects_duplicate() {
        let mut joints = all_tracked_joints();
        joints[1] = Joint::untracked(JointType::HipCenter);

        let err =
            SkeletonSample::from_joints(1, SkeletonTrackingState::Tracked, joints).unwrap_err();
        assert!(matches!(err, Error::DuplicateJoint(JointType::HipCenter)));
    }

    #[test]
    fn test_require_tracked_names_first_missing() {
        let sample = SkeletonSample::from_fn(1, SkeletonTrackingState::Tracked, |jt| {
            let state = if jt == JointType::AnkleRight {
                JointTrackingState::Inferred
            } else {
                JointTrackingState::Tracked
            };
            (Position3D::origin(), state)
        });

        assert!(sample
            .require_tracked(&[JointType::HipCenter, JointType::AnkleLeft])
            .is_ok());
        assert!(matches!(
            sample.require_tracked(&[JointType::HipCenter, JointType::AnkleRight]),
            Err(Error::MissingJoint(JointType::AnkleRight))
        ));
    }

    #[test]
    fn test_clipped_edges_iteration() {
        let edges = ClippedEdges::none()
            .with(FrameEdge::Right)
            .with(FrameEdge::Bottom);

        assert!(!edges.is_empty());
        assert_eq!(
            edges.iter().collect::<Vec<_>>(),
            vec![FrameEdge::Bottom, FrameEdge::Right]
        );
        assert!(ClippedEdges::none().is_empty());
    }

    #[test]
    fn test_sample_json_roundtrip_validates() {
        let sample = SkeletonSample::from_joints(3, SkeletonTrackingState::Tracked, all_tracked_joints())
            .unwrap()
            .with_clipped_edges(ClippedEdges::none().with(FrameEdge::Top));

        let json = serde_json::to_string(&sample).unwrap();
        let back: SkeletonSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["joints"].as_array_mut().unwrap().truncate(5);
        assert!(serde_json::from_value::<SkeletonSample>(value).is_err());
    }

    #[test]
    fn test_positions_survive_json_exactly() {
        let frame = SkeletonFrame::new(
            1,
            Timestamp::from_nanos(0),
            vec![SkeletonSample::from_fn(1, SkeletonTrackingState::Tracked, |jt| {
                let x = [1.4, 1.9, 0.1 + 0.2, -0.700_000_000_000_000_1][jt.index() % 4];
                (Position3D::new(x, x / 3.0, 2.0 + x), JointTrackingState::Tracked)
            })],
        );

        let json = serde_json::to_string(&frame).unwrap();
        let back: SkeletonFrame = serde_json::from_str(&json).unwrap();
        for (a, b) in back.skeletons[0].joints().iter().zip(frame.skeletons[0].joints()) {
            assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
            assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
            assert_eq!(a.position.z.to_bits(), b.position.z.to_bits());
        }
    }

    #[test]
    fn test_position_only_record() {
        let json = r#"{"tracking_id": 9, "tracking_state": "PositionOnly",
                       "position": {"x": 0.5, "y": 0.1, "z": 2.5}}"#;
        let sample: SkeletonSample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.tracking_state(), SkeletonTrackingState::PositionOnly);
        assert_eq!(sample.position(), Position3D::new(0.5, 0.1, 2.5));
        assert!(sample.joints().iter().all(|j| !j.is_tracked()));
    }

    #[test]
    fn test_tracked_skeletons_filter() {
        let tracked = SkeletonSample::from_joints(1, SkeletonTrackingState::Tracked, all_tracked_joints())
            .unwrap();
        let frame = SkeletonFrame::new(
            42,
            Timestamp::from_nanos(0),
            vec![tracked, SkeletonSample::position_only(2, Position3D::origin())],
        );

        let ids: Vec<u32> = frame.tracked_skeletons().map(|s| s.tracking_id()).collect();
        assert_eq!(ids, vec![1]);
    }
}
