//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] classes live here.

mod pose_dynamics;

pub use pose_dynamics::PoseDynamics;
