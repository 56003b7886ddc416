//! Structured text reports for diagrams and assembled scenes.
//!
//! Reports are plain text so that two runs can be compared line by line.

use std::collections::HashMap;
use std::fmt;

use luminaire_scene::{BoundingBox, MarkerShape, MeshBounds, MeshId, SceneGraph, SceneNode};
use photometry::diagram::{DiagramGeometry, DiagramMode, Primitive};

/// Summary of one assembled scene.
pub struct SceneReport {
    pub template_count: usize,
    pub entries: Vec<NodeEntry>,
    pub joint_count: usize,
    pub bounding_box: Option<BoundingBox>,
}

/// A single node's report line.
pub struct NodeEntry {
    pub index: usize,
    pub name: String,
    pub kind: NodeKind,
}

pub enum NodeKind {
    /// Template ordinal by first use, and the translation column.
    Mesh { template: usize, translation: [f64; 3] },
    Marker {
        parent: usize,
        shape: MarkerShape,
        position: [f64; 3],
    },
}

impl SceneReport {
    pub fn from_graph<M: MeshBounds>(graph: &SceneGraph<M>) -> Self {
        let mut ordinals: HashMap<MeshId, usize> = HashMap::new();
        let entries = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let kind = match node {
                    SceneNode::Mesh(mesh) => {
                        let next = ordinals.len();
                        let template = *ordinals.entry(mesh.mesh).or_insert(next);
                        let t = mesh.transform.translation_part();
                        NodeKind::Mesh {
                            template,
                            translation: [t.x, t.y, t.z],
                        }
                    }
                    SceneNode::Marker(marker) => NodeKind::Marker {
                        parent: marker.parent,
                        shape: marker.shape,
                        position: marker.position.to_array(),
                    },
                };
                NodeEntry {
                    index,
                    name: node.name().to_string(),
                    kind,
                }
            })
            .collect();
        Self {
            template_count: graph.meshes.len(),
            entries,
            joint_count: graph.joints.len(),
            bounding_box: graph.bounds(),
        }
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mesh_count = self
            .entries
            .iter()
            .filter(|e| matches!(e.kind, NodeKind::Mesh { .. }))
            .count();
        let mut out = String::new();
        out.push_str("=== Scene Report ===\n\n");
        out.push_str(&format!(
            "Nodes ({} meshes, {} markers, {} templates, {} joints):\n",
            mesh_count,
            self.entries.len() - mesh_count,
            self.template_count,
            self.joint_count,
        ));
        for entry in &self.entries {
            match &entry.kind {
                NodeKind::Mesh {
                    template,
                    translation: [x, y, z],
                } => out.push_str(&format!(
                    "  [{}] mesh \"{}\" template #{} at ({:.3}, {:.3}, {:.3})\n",
                    entry.index, entry.name, template, x, y, z,
                )),
                NodeKind::Marker {
                    parent,
                    shape,
                    position: [x, y, z],
                } => {
                    let shape = match shape {
                        MarkerShape::Circle { diameter } => format!("circle d={diameter:.3}"),
                        MarkerShape::Rectangle { width, height } => {
                            format!("rectangle {width:.3}x{height:.3}")
                        }
                    };
                    out.push_str(&format!(
                        "  [{}] marker \"{}\" on [{}] {} at ({:.3}, {:.3}, {:.3})\n",
                        entry.index, entry.name, parent, shape, x, y, z,
                    ));
                }
            }
        }

        match &self.bounding_box {
            Some(bb) => out.push_str(&format!(
                "\nBounding Box: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})\n",
                bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z,
            )),
            None => out.push_str("\nBounding Box: none\n"),
        }
        out
    }
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Summary of one rendered diagram.
pub struct DiagramReport {
    pub mode: DiagramMode,
    pub size: (f64, f64),
    pub no_data: bool,
    pub circles: usize,
    pub lines: usize,
    pub texts: usize,
    /// `(point count, closed)` per curve, in drawing order.
    pub curves: Vec<(usize, bool)>,
    pub legend: Vec<String>,
}

impl DiagramReport {
    pub fn from_geometry(geometry: &DiagramGeometry) -> Self {
        let mut report = Self {
            mode: geometry.mode,
            size: (geometry.width, geometry.height),
            no_data: geometry.no_data,
            circles: 0,
            lines: 0,
            texts: 0,
            curves: Vec::new(),
            legend: geometry.legend.iter().map(|l| l.label.clone()).collect(),
        };
        for primitive in &geometry.primitives {
            match primitive {
                Primitive::Circle { .. } => report.circles += 1,
                Primitive::Line { .. } => report.lines += 1,
                Primitive::Text { .. } => report.texts += 1,
                Primitive::Path { points, closed, .. } => report.curves.push((points.len(), *closed)),
                Primitive::Rect { .. } => {}
            }
        }
        report
    }

    pub fn to_text(&self) -> String {
        let mode = match self.mode {
            DiagramMode::Polar => "polar",
            DiagramMode::Cartesian => "cartesian",
        };
        let mut out = format!(
            "=== Diagram Report ({mode}, {}x{}) ===\n",
            self.size.0, self.size.1
        );
        if self.no_data {
            out.push_str("No data\n");
        }
        out.push_str(&format!(
            "Grid: {} circles, {} lines, {} labels\n",
            self.circles, self.lines, self.texts
        ));
        out.push_str(&format!("Curves ({}):\n", self.curves.len()));
        for (i, (points, closed)) in self.curves.iter().enumerate() {
            let label = self.legend.get(i).map_or("?", String::as_str);
            let shape = if *closed { "closed" } else { "open" };
            out.push_str(&format!("  {label}: {points} points, {shape}\n"));
        }
        out
    }
}

impl fmt::Display for DiagramReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
