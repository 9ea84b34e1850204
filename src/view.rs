//! Family tree view orchestration.
//!
//! `FamilyTreeView` is the surface the screen layer talks to: it owns the
//! loader, the current layout, the pan/zoom transform, selection and the
//! generation filter, and turns all of that into frame-gated draw lists.
//! It never blocks on I/O; loads run on worker threads and land via
//! [`poll`](FamilyTreeView::poll).

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::info;

use crate::components::FowlId;
use crate::genealogy::stats::{Clock, TreeStatistics};
use crate::genealogy::DEFAULT_MAX_DEPTH;
use crate::layout::{layout_tree, LayoutConfig, TreeLayout};
use crate::loader::{LoadedTree, TreeLoader};
use crate::registry::FowlRegistry;
use crate::render::{
    build_draw_list, hit_test, sample_pressure, DrawList, MemoryPressure, RenderBudget,
    ViewTransform, Viewport, ZoomLimits,
};

#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub layout: LayoutConfig,
    pub zoom: ZoomLimits,
    pub budget: RenderBudget,
    pub max_depth: u32,
    /// Minimum spacing between rendered frames (~60fps).
    pub min_frame_interval: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            zoom: ZoomLimits::default(),
            budget: RenderBudget::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            min_frame_interval: Duration::from_millis(16),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { epoch: u64 },
    Ready,
    /// Error state with a retry affordance; `retry` re-issues the same root.
    Failed(String),
}

pub struct FamilyTreeView {
    config: ViewConfig,
    loader: TreeLoader,
    state: LoadState,
    last_root: Option<FowlId>,
    tree: Option<LoadedTree>,
    layout: TreeLayout,
    transform: ViewTransform,
    selection: Option<FowlId>,
    generation_filter: Option<u32>,
    canvas_width: f32,
    canvas_height: f32,
    last_frame: Option<Instant>,
}

impl FamilyTreeView {
    pub fn new(
        registry: Arc<Mutex<FowlRegistry>>,
        clock: Arc<dyn Clock>,
        config: ViewConfig,
    ) -> Self {
        let transform = ViewTransform::new(config.zoom);
        Self {
            loader: TreeLoader::new(registry, clock),
            state: LoadState::Idle,
            last_root: None,
            tree: None,
            layout: TreeLayout::default(),
            transform,
            selection: None,
            generation_filter: None,
            canvas_width: 1080.0,
            canvas_height: 1920.0,
            last_frame: None,
            config,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn statistics(&self) -> Option<TreeStatistics> {
        self.tree.as_ref().map(|t| t.statistics)
    }

    /// Root of the currently applied tree, if one has loaded.
    pub fn current_root(&self) -> Option<FowlId> {
        self.tree.as_ref().map(|t| t.root)
    }

    pub fn selection(&self) -> Option<FowlId> {
        self.selection
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start loading the subgraph around `root`. Supersedes any in-flight
    /// load; the superseded result will be discarded on arrival.
    pub fn request_load(&mut self, root: FowlId) {
        self.last_root = Some(root);
        let epoch = self.loader.request(root, self.config.max_depth);
        self.state = LoadState::Loading { epoch };
    }

    /// Re-issue the last requested load (the failure-state retry affordance).
    pub fn retry(&mut self) {
        if let Some(root) = self.last_root {
            self.request_load(root);
        }
    }

    /// Drain completed loads. Only the newest request's outcome is applied;
    /// anything older is dropped. Returns true when the view state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(outcome) = self.loader.try_recv() {
            if outcome.epoch < self.loader.latest_epoch() {
                info!(epoch = outcome.epoch, "dropping superseded load result");
                continue;
            }
            match outcome.result {
                Ok(tree) => {
                    info!(
                        root = tree.root.0,
                        nodes = tree.subgraph.nodes.len(),
                        "family tree ready"
                    );
                    self.tree = Some(tree);
                    self.selection = None;
                    self.generation_filter = None;
                    self.relayout();
                    self.fit_to_view();
                    self.state = LoadState::Ready;
                }
                Err(err) => {
                    info!(error = %err, "family tree load failed");
                    self.state = LoadState::Failed(err.to_string());
                }
            }
            changed = true;
        }
        changed
    }

    // ========================================================================
    // Canvas and camera
    // ========================================================================

    /// The layout is a function of the canvas size, so a resize recomputes it.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some(tree) = &self.tree else {
            self.layout = TreeLayout::default();
            return;
        };
        self.layout = layout_tree(
            &tree.subgraph.nodes,
            &tree.generations,
            self.canvas_width,
            self.canvas_height,
            &self.config.layout,
        );
    }

    pub fn set_zoom(&mut self, level: f32, animate: bool) {
        self.transform.set_zoom(level, animate);
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.transform.pan(dx, dy);
    }

    pub fn center_tree(&mut self) {
        self.transform
            .center_on(self.layout.bounds, self.canvas_width, self.canvas_height);
    }

    pub fn fit_to_view(&mut self) {
        self.transform
            .fit_to_view(self.layout.bounds, self.canvas_width, self.canvas_height);
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Select a loaded node. Returns false (and leaves the selection alone)
    /// when the id is not in the current tree.
    pub fn select_node(&mut self, id: FowlId) -> bool {
        if self.layout.node(id).is_some() {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Map a screen tap to a node id, if one is under it.
    pub fn hit_test(&self, screen_x: f32, screen_y: f32) -> Option<FowlId> {
        hit_test(&self.layout, &self.transform, screen_x, screen_y)
    }

    /// Restrict rendering to one generation band; `None` shows everything.
    pub fn filter_by_generation(&mut self, generation: Option<u32>) {
        self.generation_filter = generation;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Build the draw list for this frame, sampling live memory pressure.
    /// Returns `None` when the previous frame was drawn too recently.
    pub fn render(&mut self, now: Instant) -> Option<DrawList> {
        let pressure = sample_pressure(&self.config.budget);
        self.render_with_pressure(now, pressure)
    }

    /// Same as [`render`](Self::render) but with a caller-supplied pressure
    /// signal, for hosts that receive platform trim-memory callbacks.
    pub fn render_with_pressure(
        &mut self,
        now: Instant,
        pressure: MemoryPressure,
    ) -> Option<DrawList> {
        if let Some(last) = self.last_frame {
            if now.duration_since(last) < self.config.min_frame_interval {
                return None;
            }
        }
        self.last_frame = Some(now);
        self.transform.step_animation();

        let edges = self
            .tree
            .as_ref()
            .map(|t| t.subgraph.edges.as_slice())
            .unwrap_or(&[]);
        Some(build_draw_list(
            &self.layout,
            edges,
            &self.transform,
            Viewport::new(self.canvas_width, self.canvas_height),
            pressure,
            &self.config.budget,
            self.selection,
            self.generation_filter,
        ))
    }
}
