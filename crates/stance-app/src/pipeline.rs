//! Per-frame evaluate-then-render pipeline.
//!
//! Each frame is handled independently: it is evaluated, drawn into a fresh
//! [`DisplayList`], and handed back as a [`FrameReport`]. Nothing carries over
//! from one frame to the next apart from the run counters.

use stance_core::{Error, Result, SkeletonFrame};
use stance_eval::{FrameEvaluation, FrameEvaluator, PoseVerdict};
use stance_render::{CameraProjection, DisplayList, ScreenMapper, SkeletonRenderer};

use crate::config::StanceConfig;
use crate::sensor::SkeletonSource;

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame_number: u64,
    pub evaluation: FrameEvaluation,
    pub display: DisplayList,
}

impl FrameReport {
    pub fn command_count(&self) -> usize {
        self.display.len()
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames: u64,
    pub skeletons: u64,
    pub correct: u64,
    pub close: u64,
    pub incorrect: u64,
}

impl PipelineStats {
    fn record(&mut self, evaluation: &FrameEvaluation) {
        self.frames += 1;
        for skeleton in &evaluation.skeletons {
            self.skeletons += 1;
            match skeleton.evaluation.verdict {
                PoseVerdict::Correct => self.correct += 1,
                PoseVerdict::Close => self.close += 1,
                PoseVerdict::Incorrect => self.incorrect += 1,
            }
        }
    }
}

/// Evaluates and draws frames from a skeleton source
pub struct FramePipeline<M: ScreenMapper = CameraProjection> {
    evaluator: FrameEvaluator,
    renderer: SkeletonRenderer,
    mapper: M,
}

impl FramePipeline<CameraProjection> {
    /// Build the pipeline described by `config`, projecting through the
    /// depth camera model sized to the render surface.
    pub fn from_config(config: &StanceConfig) -> Result<Self> {
        let evaluator = FrameEvaluator::new(config.thresholds)?;
        let renderer =
            SkeletonRenderer::new(config.render).map_err(|e| Error::Config(e.to_string()))?;
        let mapper = CameraProjection::depth_camera(config.render.width, config.render.height)
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self::new(evaluator, renderer, mapper))
    }
}

impl<M: ScreenMapper> FramePipeline<M> {
    pub fn new(evaluator: FrameEvaluator, renderer: SkeletonRenderer, mapper: M) -> Self {
        Self {
            evaluator,
            renderer,
            mapper,
        }
    }

    pub fn process_frame(&self, frame: &SkeletonFrame) -> FrameReport {
        let evaluation = self.evaluator.evaluate_frame(frame);

        let mut list = DisplayList::new();
        self.renderer
            .render_frame(frame, &evaluation, &self.mapper, &mut list);

        tracing::trace!(
            frame = frame.frame_number,
            skeletons = evaluation.skeletons.len(),
            commands = list.len(),
            "Frame processed"
        );

        FrameReport {
            frame_number: frame.frame_number,
            evaluation,
            display: list,
        }
    }

    /// Drain `source` until its stream ends, passing each report to
    /// `on_frame`. The source is stopped on both success and error.
    pub async fn run<S, F>(&self, source: &mut S, mut on_frame: F) -> Result<PipelineStats>
    where
        S: SkeletonSource + ?Sized,
        F: FnMut(&FrameReport),
    {
        source.start().await?;

        let mut stats = PipelineStats::default();
        let outcome = loop {
            match source.recv().await {
                Ok(Some(frame)) => {
                    let report = self.process_frame(&frame);
                    stats.record(&report.evaluation);
                    on_frame(&report);
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        source.stop().await?;

        if let Err(e) = outcome {
            tracing::error!("Skeleton stream failed: {}", e);
            return Err(e);
        }

        tracing::info!(
            frames = stats.frames,
            skeletons = stats.skeletons,
            correct = stats.correct,
            close = stats.close,
            incorrect = stats.incorrect,
            "Skeleton stream ended"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;
    use crate::sensor::tests::{replay_config, tracked_sample, write_recording};
    use crate::sensor::ReplaySource;
    use async_trait::async_trait;
    use stance_core::{JointType, Position3D, SkeletonSample, Timestamp, TrackingMode};

    fn pipeline() -> FramePipeline {
        FramePipeline::from_config(&StanceConfig::default()).unwrap()
    }

    fn frame(frame_number: u64, skeletons: Vec<SkeletonSample>) -> SkeletonFrame {
        SkeletonFrame::new(frame_number, Timestamp::from_nanos(0), skeletons)
    }

    #[test]
    fn test_process_frame_evaluates_and_draws() {
        let report = pipeline().process_frame(&frame(
            7,
            vec![
                tracked_sample(1),
                SkeletonSample::position_only(2, Position3D::new(0.3, 0.0, 2.5)),
            ],
        ));

        assert_eq!(report.frame_number, 7);
        assert_eq!(report.evaluation.skeletons.len(), 1);
        assert_eq!(report.evaluation.verdict_for(1), Some(PoseVerdict::Correct));
        assert_eq!(report.evaluation.verdict_for(2), None);

        // Background, 19 bones, 20 joints, one centre point
        assert_eq!(report.command_count(), 1 + 19 + 20 + 1);
    }

    #[test]
    fn test_empty_frame_draws_background_only() {
        let report = pipeline().process_frame(&frame(0, Vec::new()));
        assert!(report.evaluation.is_empty());
        assert_eq!(report.command_count(), 1);
    }

    #[test]
    fn test_frames_are_independent() {
        let p = pipeline();
        let busy = frame(1, vec![tracked_sample(1), tracked_sample(2)]);
        let quiet = frame(2, vec![tracked_sample(3)]);

        let first = p.process_frame(&quiet);
        p.process_frame(&busy);
        let second = p.process_frame(&quiet);

        assert_eq!(first.evaluation.skeletons, second.evaluation.skeletons);
        assert_eq!(first.display, second.display);
    }

    #[tokio::test]
    async fn test_run_replay_to_end() {
        let base = tracked_sample(9);
        let feet_apart = SkeletonSample::from_fn(9, base.tracking_state(), |jt| {
            let j = base[jt];
            let position = match jt {
                JointType::AnkleLeft => Position3D::new(-0.35, -1.0, 2.0),
                JointType::AnkleRight => Position3D::new(0.35, -1.0, 2.0),
                _ => j.position,
            };
            (position, j.tracking_state)
        });

        let frames = vec![
            frame(0, vec![tracked_sample(1)]),
            frame(1, vec![feet_apart]),
            frame(2, Vec::new()),
        ];
        let path = write_recording("pipeline-run", &frames);
        let mut source = ReplaySource::new(&replay_config(path.clone()));

        let mut seen = Vec::new();
        let stats = pipeline()
            .run(&mut source, |report| seen.push(report.frame_number))
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(
            stats,
            PipelineStats {
                frames: 3,
                skeletons: 2,
                correct: 2,
                close: 0,
                incorrect: 0,
            }
        );
        assert!(!source.is_running());
    }

    #[tokio::test]
    async fn test_run_seated_never_correct() {
        let frames = vec![frame(0, vec![tracked_sample(1)])];
        let path = write_recording("pipeline-seated", &frames);
        let mut source = ReplaySource::new(&SensorConfig {
            tracking_mode: TrackingMode::Seated,
            ..replay_config(path.clone())
        });

        let stats = pipeline().run(&mut source, |_| {}).await.unwrap();
        std::fs::remove_file(&path).ok();

        // Arms still line up; the legs are no longer tracked
        assert_eq!(stats.close, 1);
        assert_eq!(stats.correct, 0);
    }

    struct FailingSource {
        running: bool,
    }

    #[async_trait]
    impl SkeletonSource for FailingSource {
        async fn start(&mut self) -> Result<()> {
            self.running = true;
            Ok(())
        }

        async fn stop(&mut self) -> Result<()> {
            self.running = false;
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn tracking_mode(&self) -> TrackingMode {
            TrackingMode::Standing
        }

        fn set_tracking_mode(&mut self, _mode: TrackingMode) {}

        async fn recv(&mut self) -> Result<Option<SkeletonFrame>> {
            Err(Error::Sensor("device disconnected".into()))
        }
    }

    #[tokio::test]
    async fn test_run_stops_source_on_error() {
        let mut source = FailingSource { running: false };
        let result = pipeline().run(&mut source, |_| {}).await;

        assert!(matches!(result, Err(Error::Sensor(_))));
        assert!(!source.is_running());
    }

    #[tokio::test]
    async fn test_run_missing_recording() {
        let mut source = ReplaySource::new(&replay_config("/nonexistent/stance.jsonl".into()));
        let result = pipeline().run(&mut source, |_| {}).await;
        assert!(matches!(result, Err(Error::SensorUnavailable(_))));
    }
}
