//! Viewport-culled draw-list building.
//!
//! The renderer never paints: it emits plain draw instructions for whatever
//! canvas the host owns. Only nodes and edges intersecting the (margin-
//! expanded) viewport make it into the list, and a measured memory-pressure
//! signal degrades instruction detail before the host ever sees an
//! allocation failure.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::FowlId;
use crate::genealogy::builder::{ParentEdge, ParentKind};
use crate::layout::TreeLayout;
use crate::render::viewport::ViewTransform;

// ============================================================================
// Memory pressure
// ============================================================================

/// Process physical-memory thresholds driving quality degradation, plus the
/// hard node cap applied under critical pressure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderBudget {
    pub elevated_bytes: usize,
    pub critical_bytes: usize,
    pub critical_node_cap: usize,
}

impl Default for RenderBudget {
    fn default() -> Self {
        Self {
            elevated_bytes: 384 * 1024 * 1024,
            critical_bytes: 512 * 1024 * 1024,
            critical_node_cap: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Normal,
    Elevated,
    Critical,
}

impl MemoryPressure {
    pub fn quality(self) -> RenderQuality {
        match self {
            MemoryPressure::Normal => RenderQuality::Full,
            MemoryPressure::Elevated => RenderQuality::Simplified,
            MemoryPressure::Critical => RenderQuality::Minimal,
        }
    }
}

pub fn classify_pressure(physical_bytes: usize, budget: &RenderBudget) -> MemoryPressure {
    if physical_bytes >= budget.critical_bytes {
        MemoryPressure::Critical
    } else if physical_bytes >= budget.elevated_bytes {
        MemoryPressure::Elevated
    } else {
        MemoryPressure::Normal
    }
}

/// Sample the process's physical memory and classify it. An unreadable stat
/// counts as normal pressure.
pub fn sample_pressure(budget: &RenderBudget) -> MemoryPressure {
    match memory_stats::memory_stats() {
        Some(stats) => classify_pressure(stats.physical_mem, budget),
        None => {
            warn!("memory stats unavailable, assuming normal pressure");
            MemoryPressure::Normal
        }
    }
}

// ============================================================================
// Draw instructions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderQuality {
    Full,
    Simplified,
    Minimal,
}

/// One node's draw instruction, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeDrawOp {
    /// Labelled circle with verification badge and selection ring.
    Full {
        id: FowlId,
        x: f32,
        y: f32,
        radius: f32,
        label: String,
        generation: u32,
        verified: bool,
        selected: bool,
    },
    /// Bare circle, no text.
    Circle { id: FowlId, x: f32, y: f32, radius: f32 },
    /// Minimal placeholder point.
    Marker { id: FowlId, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDrawOp {
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub kind: ParentKind,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub nodes: Vec<NodeDrawOp>,
    pub edges: Vec<EdgeDrawOp>,
}

/// Visible screen region plus the cull margin around it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub cull_margin: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cull_margin: 64.0,
        }
    }

    /// Does a screen-space circle intersect the margin-expanded viewport?
    fn intersects_circle(&self, x: f32, y: f32, radius: f32) -> bool {
        x + radius >= -self.cull_margin
            && x - radius <= self.width + self.cull_margin
            && y + radius >= -self.cull_margin
            && y - radius <= self.height + self.cull_margin
    }

    /// Does a screen-space segment's bounding box intersect the viewport?
    fn intersects_segment(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
        x1.max(x2) >= -self.cull_margin
            && x1.min(x2) <= self.width + self.cull_margin
            && y1.max(y2) >= -self.cull_margin
            && y1.min(y2) <= self.height + self.cull_margin
    }
}

/// Pure instruction builder for one node at one quality level.
fn draw_node(
    quality: RenderQuality,
    node: &crate::layout::GenealogyNode,
    x: f32,
    y: f32,
    radius: f32,
    selected: bool,
) -> NodeDrawOp {
    match quality {
        RenderQuality::Full => NodeDrawOp::Full {
            id: node.record.id,
            x,
            y,
            radius,
            label: node.record.name.clone(),
            generation: node.generation,
            verified: node.record.lineage_verified,
            selected,
        },
        RenderQuality::Simplified => NodeDrawOp::Circle {
            id: node.record.id,
            x,
            y,
            radius,
        },
        RenderQuality::Minimal => NodeDrawOp::Marker {
            id: node.record.id,
            x,
            y,
        },
    }
}

/// Build the culled draw list for one frame.
///
/// Under critical pressure the node set is first narrowed to generations 0
/// and 1, then hard-capped; this is a resource policy, not a correctness
/// guarantee, and the next frame under normal pressure restores everything.
#[allow(clippy::too_many_arguments)]
pub fn build_draw_list(
    layout: &TreeLayout,
    edges: &[ParentEdge],
    transform: &ViewTransform,
    viewport: Viewport,
    pressure: MemoryPressure,
    budget: &RenderBudget,
    selection: Option<FowlId>,
    generation_filter: Option<u32>,
) -> DrawList {
    let quality = pressure.quality();

    let mut candidates: Vec<&crate::layout::GenealogyNode> = layout
        .nodes
        .iter()
        .filter(|n| generation_filter.map_or(true, |g| n.generation == g))
        .collect();

    if pressure == MemoryPressure::Critical {
        candidates.retain(|n| n.generation <= 1);
        if candidates.len() > budget.critical_node_cap {
            candidates.truncate(budget.critical_node_cap);
        }
    }

    let mut list = DrawList::default();
    let mut included: Vec<FowlId> = Vec::with_capacity(candidates.len());

    for node in &candidates {
        let (sx, sy) = transform.to_screen(node.x, node.y);
        let radius = node.radius * transform.scale;
        included.push(node.record.id);
        if !viewport.intersects_circle(sx, sy, radius) {
            continue;
        }
        let selected = selection == Some(node.record.id);
        list.nodes.push(draw_node(quality, node, sx, sy, radius, selected));
    }

    // Edges draw between surviving endpoints, culled on the segment box so a
    // connection crossing the screen still shows when both nodes are off it.
    for edge in edges {
        if !included.contains(&edge.parent) || !included.contains(&edge.child) {
            continue;
        }
        let (Some(parent), Some(child)) = (layout.node(edge.parent), layout.node(edge.child))
        else {
            continue;
        };
        let (x1, y1) = transform.to_screen(parent.x, parent.y);
        let (x2, y2) = transform.to_screen(child.x, child.y);
        if !viewport.intersects_segment(x1, y1, x2, y2) {
            continue;
        }
        list.edges.push(EdgeDrawOp {
            from_x: x1,
            from_y: y1,
            to_x: x2,
            to_y: y2,
            kind: edge.kind,
            verified: edge.verified,
        });
    }

    list
}

/// Map a screen point through the inverse transform and return the first
/// node (in layout order) whose render radius contains it. Overlapping nodes
/// tie-break by that iteration order.
pub fn hit_test(
    layout: &TreeLayout,
    transform: &ViewTransform,
    screen_x: f32,
    screen_y: f32,
) -> Option<FowlId> {
    let (tx, ty) = transform.to_tree(screen_x, screen_y);
    layout
        .nodes
        .iter()
        .find(|n| {
            let dx = n.x - tx;
            let dy = n.y - ty;
            dx * dx + dy * dy <= n.radius * n.radius
        })
        .map(|n| n.record.id)
}
