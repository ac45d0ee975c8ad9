//! Radial layout of the skill catalog.
//!
//! Categories sit on an inner ring around the canvas centre, starting at the
//! top and proceeding clockwise in catalog order. Each category fans its
//! children over a fixed arc centred on its own angle, alternating between two
//! outer rings so neighbouring labels do not collide.

use serde::Serialize;
use std::f64::consts::PI;

use super::geometry::Point;
use crate::domain::catalog::{SkillCategory, SkillNode};

pub const DEFAULT_CANVAS_WIDTH: f64 = 1000.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1000.0;

/// Tunable geometry for [`layout_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutConfig {
    /// Radius of the category ring.
    pub inner_radius: f64,
    /// Radius of the first (even-index) skill ring.
    pub outer_radius: f64,
    /// Extra radius for odd-index skills.
    pub ring_offset: f64,
    /// Angular width of a category's fan of children, radians.
    pub spread: f64,
    /// Horizontal gap between a node and a side-anchored label.
    pub label_offset: f64,
    /// Half-width of the band around the vertical centreline where labels
    /// are centred above or below the node instead.
    pub centerline_band: f64,
    pub label_above: f64,
    pub label_below: f64,
    pub label_baseline: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            inner_radius: 125.0,
            outer_radius: 260.0,
            ring_offset: 60.0,
            spread: PI / 1.4,
            label_offset: 18.0,
            centerline_band: 60.0,
            label_above: -15.0,
            label_below: 20.0,
            label_baseline: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Category,
    Skill,
}

/// SVG-style text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub anchor: TextAnchor,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub category: SkillCategory,
    /// Owning category id; equals `id` for category nodes.
    pub parent_id: String,
    pub angle: f64,
    /// 0 for the base ring, 1 for the staggered ring. Categories use 0.
    pub ring: u8,
    pub position: Point,
    pub label_placement: LabelPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Centre to category.
    Core,
    /// Category to skill.
    Sub,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub kind: EdgeKind,
    /// `None` for edges starting at the centre.
    pub from: Option<String>,
    pub to: String,
    pub source: Point,
    pub target: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstellationLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub categories: Vec<PlacedNode>,
    pub skills: Vec<PlacedNode>,
    pub edges: Vec<Edge>,
}

impl ConstellationLayout {
    /// Placed node by id, category or skill.
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.categories
            .iter()
            .chain(self.skills.iter())
            .find(|n| n.id == id)
    }
}

/// Lays out the catalog with the default geometry.
pub fn layout(categories: &[SkillNode], width: f64, height: f64) -> ConstellationLayout {
    layout_with(&LayoutConfig::default(), categories, width, height)
}

/// Lays out the catalog. Pure and deterministic; an empty catalog yields an
/// empty layout.
pub fn layout_with(
    config: &LayoutConfig,
    categories: &[SkillNode],
    width: f64,
    height: f64,
) -> ConstellationLayout {
    let center = Point::new(width / 2.0, height / 2.0);
    let mut placed_categories = Vec::with_capacity(categories.len());
    let mut skills = Vec::new();
    let mut edges = Vec::new();
    let n = categories.len() as f64;

    for (i, category) in categories.iter().enumerate() {
        let angle = i as f64 * 2.0 * PI / n - PI / 2.0;
        let position = center.polar_offset(angle, config.inner_radius);
        edges.push(Edge {
            kind: EdgeKind::Core,
            from: None,
            to: category.id.clone(),
            source: center,
            target: position,
        });

        let children = category.children();
        let count = children.len();
        let start = angle - config.spread / 2.0;
        let step = if count > 1 {
            config.spread / (count - 1) as f64
        } else {
            0.0
        };

        for (j, child) in children.iter().enumerate() {
            let child_angle = if count == 1 { angle } else { start + j as f64 * step };
            let ring = (j % 2) as u8;
            let radius = config.outer_radius + f64::from(ring) * config.ring_offset;
            let child_position = center.polar_offset(child_angle, radius);
            edges.push(Edge {
                kind: EdgeKind::Sub,
                from: Some(category.id.clone()),
                to: child.id.clone(),
                source: position,
                target: child_position,
            });
            skills.push(PlacedNode {
                id: child.id.clone(),
                label: child.label.clone(),
                kind: NodeKind::Skill,
                category: child.category,
                parent_id: category.id.clone(),
                angle: child_angle,
                ring,
                position: child_position,
                label_placement: place_label(config, center, child_position),
            });
        }

        placed_categories.push(PlacedNode {
            id: category.id.clone(),
            label: category.label.clone(),
            kind: NodeKind::Category,
            category: category.category,
            parent_id: category.id.clone(),
            angle,
            ring: 0,
            position,
            label_placement: place_label(config, center, position),
        });
    }

    ConstellationLayout {
        width,
        height,
        center,
        categories: placed_categories,
        skills,
        edges,
    }
}

/// Side-anchored labels grow away from the centreline; nodes close to it get
/// a centred label above (top half) or below (bottom half).
fn place_label(config: &LayoutConfig, center: Point, node: Point) -> LabelPlacement {
    let dx = (node.x - center.x).abs();
    if dx < config.centerline_band {
        let dy = if node.y < center.y {
            config.label_above
        } else {
            config.label_below
        };
        return LabelPlacement {
            anchor: TextAnchor::Middle,
            position: Point::new(node.x, node.y + dy),
        };
    }
    if node.x < center.x {
        LabelPlacement {
            anchor: TextAnchor::End,
            position: Point::new(node.x - config.label_offset, node.y + config.label_baseline),
        }
    } else {
        LabelPlacement {
            anchor: TextAnchor::Start,
            position: Point::new(node.x + config.label_offset, node.y + config.label_baseline),
        }
    }
}
