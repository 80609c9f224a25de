//! Skeleton overlay rendering.

use serde::{Deserialize, Serialize};
use stance_core::{
    FrameEdge, Joint, JointTrackingState, JointType, SkeletonFrame, SkeletonSample,
    SkeletonTrackingState,
};
use stance_eval::{FrameEvaluation, PoseVerdict};

use crate::drawing::{Brush, Color, DrawingContext, Pen, Rect};
use crate::projection::ScreenMapper;
use crate::{RenderError, RenderResult};

/// Bone connections of the 20-joint topology
pub const SKELETON_BONES: &[(JointType, JointType)] = &[
    // Torso
    (JointType::Head, JointType::ShoulderCenter),
    (JointType::ShoulderCenter, JointType::ShoulderLeft),
    (JointType::ShoulderCenter, JointType::ShoulderRight),
    (JointType::ShoulderCenter, JointType::Spine),
    (JointType::Spine, JointType::HipCenter),
    (JointType::HipCenter, JointType::HipLeft),
    (JointType::HipCenter, JointType::HipRight),
    // Left arm
    (JointType::ShoulderLeft, JointType::ElbowLeft),
    (JointType::ElbowLeft, JointType::WristLeft),
    (JointType::WristLeft, JointType::HandLeft),
    // Right arm
    (JointType::ShoulderRight, JointType::ElbowRight),
    (JointType::ElbowRight, JointType::WristRight),
    (JointType::WristRight, JointType::HandRight),
    // Left leg
    (JointType::HipLeft, JointType::KneeLeft),
    (JointType::KneeLeft, JointType::AnkleLeft),
    (JointType::AnkleLeft, JointType::FootLeft),
    // Right leg
    (JointType::HipRight, JointType::KneeRight),
    (JointType::KneeRight, JointType::AnkleRight),
    (JointType::AnkleRight, JointType::FootRight),
];

const BACKGROUND_BRUSH: Brush = Brush::solid(Color::BLACK);
const TRACKED_JOINT_BRUSH: Brush = Brush::solid(Color::rgba(68, 192, 68, 255));
const INFERRED_JOINT_BRUSH: Brush = Brush::solid(Color::YELLOW);
const CENTER_POINT_BRUSH: Brush = Brush::solid(Color::BLUE);
const CLIP_BRUSH: Brush = Brush::solid(Color::RED);

/// Surface size and stroke widths, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub tracked_bone_thickness: f64,
    pub inferred_bone_thickness: f64,
    pub joint_thickness: f64,
    pub body_center_thickness: f64,
    pub clip_bounds_thickness: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            tracked_bone_thickness: 6.0,
            inferred_bone_thickness: 1.0,
            joint_thickness: 3.0,
            body_center_thickness: 10.0,
            clip_bounds_thickness: 10.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(RenderError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }

        let strokes = [
            self.tracked_bone_thickness,
            self.inferred_bone_thickness,
            self.joint_thickness,
            self.body_center_thickness,
            self.clip_bounds_thickness,
        ];
        if strokes.iter().any(|t| t.is_nan() || *t <= 0.0) {
            return Err(RenderError::InvalidConfig(
                "stroke thicknesses must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Stroke weight of a bone, from its endpoints' tracking states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoneStyle {
    /// Both endpoints tracked
    Tracked,
    /// At least one endpoint inferred
    Inferred,
}

/// How to draw the bone between `a` and `b`, or `None` to skip it.
///
/// A bone is skipped when either end is not tracked or both ends are only
/// inferred.
pub fn bone_style(a: &Joint, b: &Joint) -> Option<BoneStyle> {
    use JointTrackingState::*;

    match (a.tracking_state, b.tracking_state) {
        (NotTracked, _) | (_, NotTracked) => None,
        (Inferred, Inferred) => None,
        (Tracked, Tracked) => Some(BoneStyle::Tracked),
        _ => Some(BoneStyle::Inferred),
    }
}

/// Highlight colour for a verdict
pub fn verdict_color(verdict: PoseVerdict) -> Color {
    match verdict {
        PoseVerdict::Correct => Color::GREEN,
        PoseVerdict::Close => Color::YELLOW,
        PoseVerdict::Incorrect => Color::RED,
    }
}

/// Draws evaluated frames as stick figures
#[derive(Debug, Clone, Default)]
pub struct SkeletonRenderer {
    config: RenderConfig,
}

impl SkeletonRenderer {
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clear the surface and draw every skeleton in the frame.
    ///
    /// Tracked skeletons are coloured by their verdict in `evaluation`, which
    /// lists the frame's tracked skeletons in frame order. Position-only
    /// skeletons are drawn as a single centre point.
    pub fn render_frame<M, C>(
        &self,
        frame: &SkeletonFrame,
        evaluation: &FrameEvaluation,
        mapper: &M,
        ctx: &mut C,
    ) where
        M: ScreenMapper + ?Sized,
        C: DrawingContext + ?Sized,
    {
        ctx.draw_rectangle(
            BACKGROUND_BRUSH,
            Rect::new(0.0, 0.0, self.config.width, self.config.height),
        );

        let mut evaluations = evaluation.skeletons.iter();

        for skeleton in &frame.skeletons {
            match skeleton.tracking_state() {
                SkeletonTrackingState::Tracked => {
                    let verdict = match evaluations.next() {
                        Some(e) if e.tracking_id == skeleton.tracking_id() => {
                            e.evaluation.verdict
                        }
                        _ => {
                            tracing::warn!(
                                tracking_id = skeleton.tracking_id(),
                                frame = frame.frame_number,
                                "no evaluation for tracked skeleton"
                            );
                            PoseVerdict::Incorrect
                        }
                    };
                    self.draw_skeleton(skeleton, verdict, mapper, ctx);
                }
                SkeletonTrackingState::PositionOnly => {
                    ctx.draw_ellipse(
                        CENTER_POINT_BRUSH,
                        mapper.map_to_screen(skeleton.position()),
                        self.config.body_center_thickness,
                        self.config.body_center_thickness,
                    );
                }
                SkeletonTrackingState::NotTracked => {}
            }
        }
    }

    /// Clip bars, then bones, then joints for one tracked skeleton
    pub fn draw_skeleton<M, C>(
        &self,
        skeleton: &SkeletonSample,
        verdict: PoseVerdict,
        mapper: &M,
        ctx: &mut C,
    ) where
        M: ScreenMapper + ?Sized,
        C: DrawingContext + ?Sized,
    {
        for edge in skeleton.clipped_edges().iter() {
            ctx.draw_rectangle(CLIP_BRUSH, self.clip_rect(edge));
        }

        let color = verdict_color(verdict);
        for (a, b) in SKELETON_BONES {
            let (start, end) = (&skeleton[*a], &skeleton[*b]);
            let Some(style) = bone_style(start, end) else {
                continue;
            };
            let thickness = match style {
                BoneStyle::Tracked => self.config.tracked_bone_thickness,
                BoneStyle::Inferred => self.config.inferred_bone_thickness,
            };
            ctx.draw_line(
                Pen::new(color, thickness),
                mapper.map_to_screen(start.position),
                mapper.map_to_screen(end.position),
            );
        }

        for joint in skeleton.joints() {
            let brush = match joint.tracking_state {
                JointTrackingState::Tracked => TRACKED_JOINT_BRUSH,
                JointTrackingState::Inferred => INFERRED_JOINT_BRUSH,
                JointTrackingState::NotTracked => continue,
            };
            ctx.draw_ellipse(
                brush,
                mapper.map_to_screen(joint.position),
                self.config.joint_thickness,
                self.config.joint_thickness,
            );
        }
    }

    fn clip_rect(&self, edge: FrameEdge) -> Rect {
        let RenderConfig {
            width,
            height,
            clip_bounds_thickness: t,
            ..
        } = self.config;

        match edge {
            FrameEdge::Bottom => Rect::new(0.0, height - t, width, t),
            FrameEdge::Top => Rect::new(0.0, 0.0, width, t),
            FrameEdge::Left => Rect::new(0.0, 0.0, t, height),
            FrameEdge::Right => Rect::new(width - t, 0.0, t, height),
        }
    }
}
