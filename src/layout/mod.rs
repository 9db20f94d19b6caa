//! Diagram layout
//!
//! Single-row placement of rendered components and centre-to-centre edges.
//! Layout is presentational only: it never fails, and a flow whose ends have no
//! shape is simply not drawn.

use crate::models::{Position, RenderedComponent, SequenceFlow};
use crate::templates::ElementKind;
use serde::{Deserialize, Serialize};

/// Placement settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X coordinate of the first shape
    pub origin_x: f64,
    /// Y coordinate shared by every shape
    pub origin_y: f64,
    /// Horizontal distance between consecutive shapes
    pub step_x: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            step_x: 200.0,
        }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    pub fn center(&self) -> Position {
        Position {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Width and height of the shape drawn for an element kind.
pub fn shape_size(element: ElementKind) -> (f64, f64) {
    match element {
        ElementKind::StartEvent | ElementKind::EndEvent | ElementKind::IntermediateCatchEvent => {
            (32.0, 32.0)
        }
        ElementKind::ExclusiveGateway | ElementKind::ParallelGateway => (40.0, 40.0),
        ElementKind::CallActivity | ElementKind::ServiceTask => (100.0, 60.0),
        ElementKind::SubProcess => (120.0, 80.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeLayout {
    pub element_id: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub flow_id: String,
    pub source_id: String,
    pub target_id: String,
    /// Source centre, then target centre
    pub waypoints: Vec<Position>,
}

/// Computed diagram for one endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramLayout {
    /// Participant pool enclosing every shape
    pub pool: Option<Bounds>,
    pub shapes: Vec<ShapeLayout>,
    pub edges: Vec<EdgeLayout>,
}

/// Margin between the pool border and the outermost shapes
const POOL_MARGIN: f64 = 60.0;

impl DiagramLayout {
    /// Place `components` left to right in the given order and draw `flows`.
    pub fn compute(
        components: &[RenderedComponent],
        flows: &[SequenceFlow],
        config: &LayoutConfig,
    ) -> Self {
        let shapes: Vec<ShapeLayout> = components
            .iter()
            .enumerate()
            .map(|(i, component)| {
                let (width, height) = shape_size(component.element);
                ShapeLayout {
                    element_id: component.id.clone(),
                    bounds: Bounds {
                        x: config.origin_x + config.step_x * i as f64,
                        y: config.origin_y,
                        width,
                        height,
                    },
                }
            })
            .collect();

        let mut layout = Self {
            pool: pool_bounds(&shapes),
            shapes,
            edges: Vec::with_capacity(flows.len()),
        };

        for flow in flows {
            let (Some(source), Some(target)) =
                (layout.shape(&flow.source_ref), layout.shape(&flow.target_ref))
            else {
                continue;
            };
            let waypoints = vec![source.bounds.center(), target.bounds.center()];
            layout.edges.push(EdgeLayout {
                flow_id: flow.id.clone(),
                source_id: flow.source_ref.clone(),
                target_id: flow.target_ref.clone(),
                waypoints,
            });
        }

        layout
    }

    pub fn shape(&self, element_id: &str) -> Option<&ShapeLayout> {
        self.shapes.iter().find(|s| s.element_id == element_id)
    }

    /// Top-left position of an element's shape
    pub fn position(&self, element_id: &str) -> Option<Position> {
        self.shape(element_id).map(|s| s.bounds.position())
    }
}

fn pool_bounds(shapes: &[ShapeLayout]) -> Option<Bounds> {
    let first = shapes.first()?;
    let (mut min_x, mut min_y) = (first.bounds.x, first.bounds.y);
    let (mut max_x, mut max_y) = (min_x, min_y);

    for shape in shapes {
        min_x = min_x.min(shape.bounds.x);
        min_y = min_y.min(shape.bounds.y);
        max_x = max_x.max(shape.bounds.x + shape.bounds.width);
        max_y = max_y.max(shape.bounds.y + shape.bounds.height);
    }

    Some(Bounds {
        x: min_x - POOL_MARGIN,
        y: min_y - POOL_MARGIN,
        width: max_x - min_x + 2.0 * POOL_MARGIN,
        height: max_y - min_y + 2.0 * POOL_MARGIN,
    })
}
