//! Graph data for velocity plots

use serde::Serialize;

use super::VelocityValidity;
use crate::pose::TimedKeypointSet;

/// Velocity component to plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "x" | "X" => Some(Axis::X),
            "y" | "Y" => Some(Axis::Y),
            _ => None,
        }
    }
}

/// One plotted point: `x` is time (ms), `y` the velocity component
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphPoint {
    pub x: f64,
    pub y: f64,
}

/// Extent of a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl GraphBounds {
    /// `None` for an empty set
    pub fn of(points: &[GraphPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = GraphBounds {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        Some(points.iter().fold(init, |b, p| GraphBounds {
            x_min: b.x_min.min(p.x),
            x_max: b.x_max.max(p.x),
            y_min: b.y_min.min(p.y),
            y_max: b.y_max.max(p.y),
        }))
    }
}

/// Valid velocity samples of `name` over a history, oldest first
pub fn graph_points(history: &[TimedKeypointSet], name: &str, axis: Axis) -> Vec<GraphPoint> {
    history
        .iter()
        .filter_map(|set| {
            let kp = set.get(name)?;
            if !VelocityValidity::of(kp).is_valid() {
                return None;
            }
            let value = match axis {
                Axis::X => kp.x,
                Axis::Y => kp.y,
            };
            Some(GraphPoint {
                x: set.t,
                y: f64::from(value),
            })
        })
        .collect()
}
