//! Generation-band tree layout.
//!
//! Pure function of (records, generations, canvas size, config) to node
//! positions: one horizontal band per generation with founders (generation 0)
//! on the top band, rows centred in the canvas width, deterministic order
//! within a row. Rows wider than the canvas extend past its edges; the
//! viewport's fit operation uses the reported bounding box to bring them in.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::components::{FowlId, FowlSnapshot};

/// Tuned spacing constants. Hosts may ship per-tier presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical distance between generation bands.
    pub band_spacing: f32,
    /// Horizontal distance between node centres within a band.
    pub node_spacing: f32,
    pub node_radius: f32,
    pub margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            band_spacing: 140.0,
            node_spacing: 110.0,
            node_radius: 36.0,
            margin: 40.0,
        }
    }
}

/// Presentation wrapper around one record: computed generation plus placed
/// coordinates in tree space. Rebuilt on every load or resize, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenealogyNode {
    pub record: FowlSnapshot,
    pub generation: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Axis-aligned bounding box of all placed node circles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(0.0)
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub nodes: Vec<GenealogyNode>,
    pub bounds: Bounds,
}

impl TreeLayout {
    pub fn node(&self, id: FowlId) -> Option<&GenealogyNode> {
        self.nodes.iter().find(|n| n.record.id == id)
    }
}

/// Place every record on its generation band.
pub fn layout_tree(
    records: &[FowlSnapshot],
    generations: &HashMap<FowlId, u32>,
    canvas_width: f32,
    canvas_height: f32,
    config: &LayoutConfig,
) -> TreeLayout {
    if records.is_empty() {
        return TreeLayout::default();
    }

    // Bands in ascending generation order, rows ordered by id.
    let mut bands: BTreeMap<u32, Vec<&FowlSnapshot>> = BTreeMap::new();
    for record in records {
        let generation = generations.get(&record.id).copied().unwrap_or(0);
        bands.entry(generation).or_default().push(record);
    }
    for row in bands.values_mut() {
        row.sort_by_key(|r| r.id.0);
    }

    // Centre the band stack vertically, but never above the top margin.
    let band_count = bands.len() as f32;
    let stack_height = (band_count - 1.0) * config.band_spacing;
    let top = ((canvas_height - stack_height) / 2.0).max(config.margin);

    let mut nodes = Vec::with_capacity(records.len());
    for (band_index, (&generation, row)) in bands.iter().enumerate() {
        let y = top + band_index as f32 * config.band_spacing;
        let row_width = (row.len() as f32 - 1.0) * config.node_spacing;
        let start_x = (canvas_width - row_width) / 2.0;

        for (i, record) in row.iter().enumerate() {
            nodes.push(GenealogyNode {
                record: (*record).clone(),
                generation,
                x: start_x + i as f32 * config.node_spacing,
                y,
                radius: config.node_radius,
            });
        }
    }

    let bounds = bounds_of(&nodes);
    TreeLayout { nodes, bounds }
}

fn bounds_of(nodes: &[GenealogyNode]) -> Bounds {
    let mut bounds = Bounds {
        min_x: f32::MAX,
        min_y: f32::MAX,
        max_x: f32::MIN,
        max_y: f32::MIN,
    };
    for node in nodes {
        bounds.min_x = bounds.min_x.min(node.x - node.radius);
        bounds.min_y = bounds.min_y.min(node.y - node.radius);
        bounds.max_x = bounds.max_x.max(node.x + node.radius);
        bounds.max_y = bounds.max_y.max(node.y + node.radius);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::generation::assign_generations;
    use crate::genealogy::test_pool::fowl;

    fn three_generation_layout() -> TreeLayout {
        let pool = vec![
            fowl(1, None, None),
            fowl(2, None, None),
            fowl(3, Some(1), Some(2)),
            fowl(4, Some(1), Some(2)),
            fowl(5, Some(3), None),
        ];
        let generations = assign_generations(&pool);
        layout_tree(&pool, &generations, 800.0, 600.0, &LayoutConfig::default())
    }

    #[test]
    fn test_same_generation_shares_a_band() {
        let layout = three_generation_layout();

        let founders: Vec<_> = layout
            .nodes
            .iter()
            .filter(|n| n.generation == 0)
            .collect();
        assert_eq!(founders.len(), 2);
        assert_eq!(founders[0].y, founders[1].y);

        // Deeper generations sit on lower bands
        let g1 = layout.node(FowlId(3)).unwrap();
        let g2 = layout.node(FowlId(5)).unwrap();
        assert!(g1.y > founders[0].y);
        assert!(g2.y > g1.y);
    }

    #[test]
    fn test_rows_are_centred_and_ordered() {
        let layout = three_generation_layout();

        let a = layout.node(FowlId(1)).unwrap();
        let b = layout.node(FowlId(2)).unwrap();
        assert!(a.x < b.x);
        // Symmetric around the canvas centre line
        assert!((800.0 - b.x - a.x).abs() < 0.01);
    }

    #[test]
    fn test_bounds_cover_every_node_circle() {
        let layout = three_generation_layout();
        for node in &layout.nodes {
            assert!(node.x - node.radius >= layout.bounds.min_x);
            assert!(node.x + node.radius <= layout.bounds.max_x);
            assert!(node.y - node.radius >= layout.bounds.min_y);
            assert!(node.y + node.radius <= layout.bounds.max_y);
        }
        assert!(layout.bounds.width() > 0.0);
        assert!(layout.bounds.height() > 0.0);
    }

    #[test]
    fn test_empty_input() {
        let layout = layout_tree(
            &[],
            &HashMap::new(),
            800.0,
            600.0,
            &LayoutConfig::default(),
        );
        assert!(layout.nodes.is_empty());
        assert_eq!(layout.bounds, Bounds::default());
    }

    #[test]
    fn test_relayout_is_deterministic() {
        let a = three_generation_layout();
        let b = three_generation_layout();
        for (lhs, rhs) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(lhs.record.id, rhs.record.id);
            assert_eq!(lhs.x, rhs.x);
            assert_eq!(lhs.y, rhs.y);
        }
    }
}
