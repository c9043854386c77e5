//! `PoseDynamics` - JS handle owning one pose source and its pipelines
//!
//! The host pushes each detector result in with `pushFrame` and calls `tick`
//! once per animation frame so debounced gestures can fire. Derived streams
//! reach JS through registered callbacks.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::DynamicsConfig;
use crate::dynamics::{
    detect_swipe, graph_points, trajectory_streams, Axis, GraphBounds, GraphPoint,
};
use crate::error::DynamicsError;
use crate::pose::{PoseFrame, PoseSource, TimedKeypointSet};
use crate::stats::InferenceStats;
use crate::stream::{Clock, Subscription, SystemClock, Timers};

/// Payload of `onTrajectory` callbacks
#[derive(Serialize)]
struct TrajectoryPayload {
    points: Vec<GraphPoint>,
    bounds: Option<GraphBounds>,
}

/// Keypoint dynamics for one pose stream
#[wasm_bindgen]
pub struct PoseDynamics {
    config: DynamicsConfig,
    source: PoseSource,
    clock: Rc<dyn Clock>,
    timers: Timers,
    stats: InferenceStats,
    subscriptions: Vec<Subscription>,
}

#[wasm_bindgen]
impl PoseDynamics {
    /// Create from an optional config object (missing fields use defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PoseDynamics, JsValue> {
        let config: DynamicsConfig = if config.is_undefined() || config.is_null() {
            DynamicsConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| DynamicsError::invalid_config("config", e.to_string()))?
        };
        config.validate()?;

        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        log::info!(
            "pose dynamics ready: swipe on {} ({}ms window), trajectory on {:?}",
            config.gesture.keypoint,
            config.gesture.window_ms,
            config.trajectory.keypoints
        );

        Ok(PoseDynamics {
            config,
            source: PoseSource::new(),
            timers: Timers::new(Rc::clone(&clock)),
            clock,
            stats: InferenceStats::default(),
            subscriptions: Vec::new(),
        })
    }

    /// Push one detector result (`{poses, modelName}`)
    #[wasm_bindgen(js_name = pushFrame)]
    pub fn push_frame(&self, frame: JsValue) -> Result<(), JsValue> {
        let frame: PoseFrame = serde_wasm_bindgen::from_value(frame)
            .map_err(|e| DynamicsError::MalformedFrame(e.to_string()))?;
        self.source.push(frame);
        Ok(())
    }

    /// Record a failed inference; nothing is emitted for this tick
    #[wasm_bindgen(js_name = reportRejectedInference)]
    pub fn report_rejected_inference(&self, reason: &str) {
        self.source
            .push_result(Err(DynamicsError::InferenceRejected(reason.to_string())));
    }

    /// Run due timers. Returns how many fired.
    pub fn tick(&self) -> usize {
        self.timers.run_due()
    }

    /// Debounced swipe events: `{action, t}`
    #[wasm_bindgen(js_name = onGesture)]
    pub fn on_gesture(&mut self, callback: js_sys::Function) {
        let gestures = detect_swipe(&self.source.stream(), &self.config.gesture, &self.timers);
        let sub = gestures.subscribe(move |event| {
            log::info!("gesture: {} at {:.0}", event.action, event.t);
            deliver(&callback, &event);
        });
        self.subscriptions.push(sub);
    }

    /// Velocity set per frame: `{t, keypoints}`
    #[wasm_bindgen(js_name = onVelocity)]
    pub fn on_velocity(&mut self, callback: js_sys::Function) {
        let streams = self.trajectory();
        let sub = streams
            .velocities
            .subscribe(move |set: TimedKeypointSet| deliver(&callback, &set));
        self.subscriptions.push(sub);
    }

    /// Raw sample windows (debug view)
    #[wasm_bindgen(js_name = onWindow)]
    pub fn on_window(&mut self, callback: js_sys::Function) {
        let streams = self.trajectory();
        let sub = streams
            .windows
            .subscribe(move |window: Vec<TimedKeypointSet>| deliver(&callback, &window));
        self.subscriptions.push(sub);
    }

    /// Velocity graph of one keypoint: `{points, bounds}`
    ///
    /// `axis` is "x" or "y".
    #[wasm_bindgen(js_name = onTrajectory)]
    pub fn on_trajectory(
        &mut self,
        keypoint: String,
        axis: &str,
        callback: js_sys::Function,
    ) -> Result<(), JsValue> {
        let axis = Axis::parse(axis).ok_or_else(|| {
            DynamicsError::invalid_config("axis", format!("expected \"x\" or \"y\", got {:?}", axis))
        })?;
        let streams = self.trajectory();
        let sub = streams.history.subscribe(move |history: Vec<TimedKeypointSet>| {
            let points = graph_points(&history, &keypoint, axis);
            let bounds = GraphBounds::of(&points);
            deliver(&callback, &TrajectoryPayload { points, bounds });
        });
        self.subscriptions.push(sub);
        Ok(())
    }

    /// Detach every callback. The source keeps accepting frames.
    #[wasm_bindgen(js_name = clearCallbacks)]
    pub fn clear_callbacks(&mut self) {
        self.subscriptions.clear();
    }

    #[wasm_bindgen(js_name = beginInference)]
    pub fn begin_inference(&mut self) {
        self.stats.begin(self.clock.now_ms());
    }

    /// Returns a report object once per second, otherwise undefined
    #[wasm_bindgen(js_name = endInference)]
    pub fn end_inference(&mut self) -> JsValue {
        match self.stats.end(self.clock.now_ms()) {
            Some(report) => to_js(&report),
            None => JsValue::UNDEFINED,
        }
    }

    /// Last flushed `{averageMs, fps, samples}`, or undefined
    #[wasm_bindgen(js_name = inferenceStats)]
    pub fn inference_stats(&self) -> JsValue {
        self.stats
            .last_report()
            .map(|report| to_js(&report))
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen(js_name = framesDelivered)]
    pub fn frames_delivered(&self) -> f64 {
        self.source.delivered() as f64
    }

    #[wasm_bindgen(js_name = framesRejected)]
    pub fn frames_rejected(&self) -> f64 {
        self.source.rejected() as f64
    }
}

impl PoseDynamics {
    fn trajectory(&self) -> crate::dynamics::TrajectoryStreams {
        trajectory_streams(
            &self.source.stream(),
            &self.config.trajectory,
            Rc::clone(&self.clock),
        )
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn deliver<T: Serialize>(callback: &js_sys::Function, value: &T) {
    if let Err(e) = callback.call1(&JsValue::NULL, &to_js(value)) {
        log::error!("callback threw: {:?}", e);
    }
}
