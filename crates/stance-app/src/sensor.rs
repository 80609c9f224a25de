//! Skeleton stream sources.
//!
//! The live depth camera sits behind [`SkeletonSource`]; [`ReplaySource`]
//! plays back frames recorded as JSON lines.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use stance_core::{
    Error, JointTrackingState, JointType, Result, SkeletonFrame, SkeletonSample,
    SkeletonTrackingState, TrackingMode,
};

use crate::config::SensorConfig;

/// Joints the sensor does not track in seated mode
const SEATED_UNTRACKED: [JointType; 10] = [
    JointType::HipCenter,
    JointType::Spine,
    JointType::HipLeft,
    JointType::KneeLeft,
    JointType::AnkleLeft,
    JointType::FootLeft,
    JointType::HipRight,
    JointType::KneeRight,
    JointType::AnkleRight,
    JointType::FootRight,
];

/// Trait for skeleton stream backends
#[async_trait]
pub trait SkeletonSource: Send {
    /// Start the skeleton stream
    async fn start(&mut self) -> Result<()>;

    /// Stop the skeleton stream
    async fn stop(&mut self) -> Result<()>;

    /// Check if the stream is active
    fn is_running(&self) -> bool;

    fn tracking_mode(&self) -> TrackingMode;

    /// Switch between seated and standing tracking
    fn set_tracking_mode(&mut self, mode: TrackingMode);

    /// Receive the next frame; `None` once the stream has ended
    async fn recv(&mut self) -> Result<Option<SkeletonFrame>>;
}

/// Plays back a JSON-lines recording of skeleton frames
pub struct ReplaySource {
    path: PathBuf,
    tracking_mode: TrackingMode,
    frame_interval: Duration,
    queue_size: usize,
    rx: Option<mpsc::Receiver<SkeletonFrame>>,
    task: Option<JoinHandle<()>>,
}

impl ReplaySource {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            path: config.replay_path.clone(),
            tracking_mode: config.tracking_mode,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            queue_size: config.frame_queue_size.max(1),
            rx: None,
            task: None,
        }
    }
}

#[async_trait]
impl SkeletonSource for ReplaySource {
    async fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let file = tokio::fs::File::open(&self.path).await.map_err(|e| {
            Error::SensorUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let (tx, rx) = mpsc::channel(self.queue_size);
        let interval = self.frame_interval;

        let task = tokio::spawn(async move {
            let mut lines = BufReader::new(file).lines();
            let mut line_number = 0usize;

            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Replay read error: {}", e);
                        break;
                    }
                };
                line_number += 1;

                if line.trim().is_empty() {
                    continue;
                }

                let frame: SkeletonFrame = match serde_json::from_str(&line) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!(line = line_number, "Skipping malformed frame: {}", e);
                        continue;
                    }
                };

                if tx.send(frame).await.is_err() {
                    break; // Receiver dropped
                }

                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
            }
        });

        self.rx = Some(rx);
        self.task = Some(task);

        tracing::info!(
            path = %self.path.display(),
            mode = ?self.tracking_mode,
            "Replay started"
        );
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx = None;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.rx.is_some()
    }

    fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    fn set_tracking_mode(&mut self, mode: TrackingMode) {
        if mode != self.tracking_mode {
            tracing::info!(?mode, "Tracking mode changed");
        }
        self.tracking_mode = mode;
    }

    async fn recv(&mut self) -> Result<Option<SkeletonFrame>> {
        let rx = self
            .rx
            .as_mut()
            .ok_or_else(|| Error::Sensor("replay source not started".into()))?;

        let Some(frame) = rx.recv().await else {
            return Ok(None);
        };

        Ok(Some(apply_tracking_mode(frame, self.tracking_mode)))
    }
}

/// What the sensor would have reported for `frame` in `mode`
pub fn apply_tracking_mode(mut frame: SkeletonFrame, mode: TrackingMode) -> SkeletonFrame {
    if mode == TrackingMode::Seated {
        frame.skeletons = frame.skeletons.iter().map(seated_view).collect();
    }
    frame
}

fn seated_view(sample: &SkeletonSample) -> SkeletonSample {
    if sample.tracking_state() != SkeletonTrackingState::Tracked {
        return sample.clone();
    }

    SkeletonSample::from_fn(sample.tracking_id(), sample.tracking_state(), |jt| {
        let joint = sample[jt];
        if SEATED_UNTRACKED.contains(&jt) {
            (joint.position, JointTrackingState::NotTracked)
        } else {
            (joint.position, joint.tracking_state)
        }
    })
    .with_position(sample.position())
    .with_clipped_edges(sample.clipped_edges())
}
