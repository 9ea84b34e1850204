//! Toolkit-agnostic rendering: viewport transform and draw-list building.
//!
//! Nothing here touches a UI framework. The host screen feeds gestures into
//! [`viewport::ViewTransform`], asks [`draw::build_draw_list`] for
//! instructions, and paints them with whatever canvas it owns.

pub mod draw;
pub mod viewport;

pub use draw::{
    build_draw_list, classify_pressure, hit_test, sample_pressure, DrawList, EdgeDrawOp,
    MemoryPressure, NodeDrawOp, RenderBudget, RenderQuality, Viewport,
};
pub use viewport::{ViewTransform, ZoomLimits};
