//! Genealogy Engine Benchmark
//!
//! Standalone benchmark: seed a synthetic multi-generation flock, then time
//! subgraph loading, layout and draw-list building the way the tree screen
//! exercises them.

use std::time::Instant;

use genealogy::genealogy::{assign_generations, compute_statistics, SystemClock};
use genealogy::layout::{layout_tree, LayoutConfig};
use genealogy::render::{
    build_draw_list, sample_pressure, RenderBudget, ViewTransform, Viewport,
};
use genealogy::{FowlRegistry, DEFAULT_MAX_DEPTH};

use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("ROSTRY genealogy engine benchmark starting...");

    let mut registry = FowlRegistry::new();
    let founders = 200;
    let generations = 5;
    info!("Seeding {} founders, {} breeding rounds...", founders, generations);
    registry.seed_flock(founders, generations, Utc::now().date_naive());
    info!("Flock seeded. Record count: {}", registry.len());

    // Root the walk at the youngest recorded bird
    let root = registry
        .all()
        .last()
        .map(|s| s.id)
        .ok_or_else(|| anyhow::anyhow!("seeded flock is empty"))?;

    let start = Instant::now();
    let subgraph = genealogy::genealogy::load_family_subgraph(&registry, root, DEFAULT_MAX_DEPTH)?;
    let load_elapsed = start.elapsed();

    let start = Instant::now();
    let node_generations = assign_generations(&subgraph.nodes);
    let statistics = compute_statistics(&subgraph.nodes, &node_generations, &SystemClock);
    let stats_elapsed = start.elapsed();

    let start = Instant::now();
    let layout = layout_tree(
        &subgraph.nodes,
        &node_generations,
        1080.0,
        1920.0,
        &LayoutConfig::default(),
    );
    let layout_elapsed = start.elapsed();

    let budget = RenderBudget::default();
    let pressure = sample_pressure(&budget);
    let mut transform = ViewTransform::default();
    transform.fit_to_view(layout.bounds, 1080.0, 1920.0);

    let start = Instant::now();
    let mut frames = 0u32;
    for _ in 0..120 {
        let list = build_draw_list(
            &layout,
            &subgraph.edges,
            &transform,
            Viewport::new(1080.0, 1920.0),
            pressure,
            &budget,
            None,
            None,
        );
        frames += 1;
        std::hint::black_box(list);
    }
    let draw_elapsed = start.elapsed();

    info!(
        "Subgraph: {} nodes, {} edges in {:?} (generations+stats {:?})",
        subgraph.nodes.len(),
        subgraph.edges.len(),
        load_elapsed,
        stats_elapsed,
    );
    info!(
        "Statistics: total={} max_generation={} verified={} breeding_age={}",
        statistics.total, statistics.max_generation, statistics.verified, statistics.breeding_age,
    );
    info!(
        "Layout in {:?}; {} draw frames in {:?} ({:?}/frame, pressure {:?})",
        layout_elapsed,
        frames,
        draw_elapsed,
        draw_elapsed / frames,
        pressure,
    );

    Ok(())
}
