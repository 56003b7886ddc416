//! Building a [`SceneGraph`] from an [`L3dScene`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use luminaire_types::{LightEmittingObject, Part, ShapeType, L3dScene};

use crate::apply::apply_transform;
use crate::config::AssemblyConfig;
use crate::error::AssembleError;
use crate::geometry::Point3d;
use crate::graph::{MarkerNode, MarkerShape, MeshId, SceneGraph, SceneNode};
use crate::mesh::{MeshDecoder, MeshLoader};

/// Shared flag a host sets to stop an in-flight assembly.
///
/// Clones observe the same flag. Checked before each part.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Decoded templates for one assembly, keyed by geometry id.
///
/// `None` records an id whose load or decode failed, so it is not retried.
type TemplateCache = HashMap<String, Option<MeshId>>;

pub struct Assembler {
    config: AssemblyConfig,
    cancel: Option<CancelToken>,
}

impl Assembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config, cancel: None }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Assemble `scene`, loading each referenced geometry at most once.
    ///
    /// Parts with an unknown geometry id, or whose bytes cannot be loaded or
    /// decoded, are skipped. The only error is cancellation; the partially
    /// built graph is dropped together with any templates it holds.
    #[instrument(skip_all, fields(parts = scene.parts.len()))]
    pub fn run<L, D>(
        &self,
        scene: &L3dScene,
        loader: &mut L,
        decoder: &D,
    ) -> Result<SceneGraph<D::Mesh>, AssembleError>
    where
        L: MeshLoader,
        D: MeshDecoder,
    {
        let mut graph = SceneGraph::new();
        graph.joints = scene.joints.clone();
        let mut cache = TemplateCache::new();
        let mut skipped = 0usize;

        for (index, part) in scene.parts.iter().enumerate() {
            if self.cancelled() {
                warn!(completed = index, "scene assembly cancelled");
                return Err(AssembleError::Cancelled {
                    completed_parts: index,
                    total_parts: scene.parts.len(),
                });
            }

            let Some(mesh) = template_for(part, scene, &mut cache, &mut graph, loader, decoder)
            else {
                skipped += 1;
                continue;
            };

            let parent = graph.push(SceneNode::Mesh(apply_transform(
                mesh,
                part.part_name.as_str(),
                &part.world_transform,
            )));
            for leo in &part.light_emitting_objects {
                graph.push(SceneNode::Marker(self.marker(part, leo, parent)));
            }
        }

        info!(
            templates = graph.meshes.len(),
            nodes = graph.nodes.len(),
            skipped,
            "scene assembled"
        );
        Ok(graph)
    }

    fn marker(&self, part: &Part, leo: &LightEmittingObject, parent: usize) -> MarkerNode {
        let default = self.config.default_marker_size;
        let first = leo.shape_dimensions.first().copied().unwrap_or(default);
        let shape = match leo.shape_type {
            ShapeType::Circle => MarkerShape::Circle { diameter: first },
            ShapeType::Rectangle => MarkerShape::Rectangle {
                width: first,
                height: leo.shape_dimensions.get(1).copied().unwrap_or(first),
            },
        };
        let name = if leo.part_name.is_empty() {
            format!("{}_leo", part.part_name)
        } else {
            leo.part_name.clone()
        };
        MarkerNode {
            name,
            parent,
            position: Point3d::from_array(leo.position),
            shape,
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AssemblyConfig::default())
    }
}

/// Template for `part`, loading and decoding its geometry on first use.
fn template_for<L, D>(
    part: &Part,
    scene: &L3dScene,
    cache: &mut TemplateCache,
    graph: &mut SceneGraph<D::Mesh>,
    loader: &mut L,
    decoder: &D,
) -> Option<MeshId>
where
    L: MeshLoader,
    D: MeshDecoder,
{
    if let Some(cached) = cache.get(&part.geometry_id) {
        debug!(geometry = %part.geometry_id, hit = cached.is_some(), "template cache hit");
        return *cached;
    }

    let Some(definition) = scene.geometry(&part.geometry_id) else {
        warn!(part = %part.part_name, geometry = %part.geometry_id, "unknown geometry id, part skipped");
        return None;
    };

    let decoded = {
        // The buffer lives only for this block and is released on every path.
        let Some(bytes) = loader.load(definition) else {
            warn!(geometry = %definition.id, filename = %definition.filename, "mesh bytes unavailable, part skipped");
            cache.insert(part.geometry_id.clone(), None);
            return None;
        };
        decoder.decode(definition, bytes.as_ref())
    };

    let id = match decoded {
        Ok(mesh) => {
            debug!(geometry = %definition.id, "decoded mesh template");
            Some(graph.meshes.insert(mesh))
        }
        Err(err) => {
            warn!(geometry = %definition.id, error = %err, "mesh decode failed, part skipped");
            None
        }
    };
    cache.insert(part.geometry_id.clone(), id);
    id
}

/// Assemble with the default configuration and no cancellation.
pub fn assemble<L, D>(scene: &L3dScene, loader: &mut L, decoder: &D) -> SceneGraph<D::Mesh>
where
    L: MeshLoader,
    D: MeshDecoder,
{
    Assembler::default()
        .run(scene, loader, decoder)
        .unwrap_or_else(|_| SceneGraph::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::transform::Transform;
    use luminaire_types::GeometryDefinition;

    /// Decodes any non-empty buffer to its length.
    struct LenDecoder;

    impl MeshDecoder for LenDecoder {
        type Mesh = usize;

        fn decode(&self, geometry: &GeometryDefinition, bytes: &[u8]) -> Result<usize, DecodeError> {
            if bytes.is_empty() {
                return Err(DecodeError::Empty {
                    filename: geometry.filename.clone(),
                });
            }
            Ok(bytes.len())
        }
    }

    fn geometry(id: &str) -> GeometryDefinition {
        GeometryDefinition {
            id: id.into(),
            filename: format!("{id}.obj"),
            units: "m".into(),
        }
    }

    fn part(name: &str, geometry_id: &str, dx: f64) -> Part {
        Part {
            part_name: name.into(),
            geometry_id: geometry_id.into(),
            world_transform: Transform::translation(dx, 0.0, 0.0).m,
            light_emitting_objects: Vec::new(),
        }
    }

    fn leo(shape_type: ShapeType, dims: Vec<f64>) -> LightEmittingObject {
        LightEmittingObject {
            part_name: "leo".into(),
            position: [0.0, 0.0, -0.02],
            shape_type,
            shape_dimensions: dims,
        }
    }

    fn scene() -> L3dScene {
        L3dScene {
            geometry_definitions: vec![geometry("body"), geometry("empty")],
            parts: vec![
                part("a", "body", 0.0),
                part("b", "missing", 1.0),
                part("c", "empty", 2.0),
                part("d", "body", 3.0),
            ],
            joints: Vec::new(),
        }
    }

    fn loader(g: &GeometryDefinition) -> Option<Vec<u8>> {
        match g.id.as_str() {
            "body" => Some(vec![0; 12]),
            "empty" => Some(Vec::new()),
            _ => None,
        }
    }

    #[test]
    fn test_skips_missing_and_undecodable_parts() {
        let graph = assemble(&scene(), &mut loader, &LenDecoder);
        let names: Vec<&str> = graph.nodes.iter().map(SceneNode::name).collect();
        assert_eq!(names, ["a", "d"]);
        assert_eq!(graph.meshes.len(), 1);
    }

    #[test]
    fn test_shared_geometry_loaded_once() {
        let mut calls: Vec<String> = Vec::new();
        let mut counting = |g: &GeometryDefinition| {
            calls.push(g.id.clone());
            loader(g)
        };
        let mut s = scene();
        s.parts.push(part("e", "empty", 4.0));
        let graph = assemble(&s, &mut counting, &LenDecoder);
        assert_eq!(calls, ["body", "empty"]);

        let nodes: Vec<_> = graph.mesh_nodes().collect();
        assert_eq!(nodes[0].mesh, nodes[1].mesh);
        assert_eq!(nodes[1].transform.m[12], 3.0);
    }

    #[test]
    fn test_marker_sizes() {
        let mut s = scene();
        s.parts[0].light_emitting_objects = vec![
            leo(ShapeType::Circle, vec![0.1]),
            leo(ShapeType::Circle, vec![]),
            leo(ShapeType::Rectangle, vec![0.3, 0.2]),
            leo(ShapeType::Rectangle, vec![0.4]),
            leo(ShapeType::Rectangle, vec![]),
        ];
        let graph = assemble(&s, &mut loader, &LenDecoder);
        let shapes: Vec<MarkerShape> = graph.markers().map(|m| m.shape).collect();
        assert_eq!(
            shapes,
            [
                MarkerShape::Circle { diameter: 0.1 },
                MarkerShape::Circle { diameter: 0.05 },
                MarkerShape::Rectangle { width: 0.3, height: 0.2 },
                MarkerShape::Rectangle { width: 0.4, height: 0.4 },
                MarkerShape::Rectangle { width: 0.05, height: 0.05 },
            ]
        );
        assert!(graph.markers().all(|m| m.parent == 0));
        assert_eq!(graph.markers().next().unwrap().position, Point3d::new(0.0, 0.0, -0.02));
    }

    #[test]
    fn test_custom_marker_default() {
        let mut s = scene();
        s.parts[0].light_emitting_objects = vec![leo(ShapeType::Circle, vec![])];
        let assembler = Assembler::new(AssemblyConfig {
            default_marker_size: 0.2,
        });
        let graph = assembler.run(&s, &mut loader, &LenDecoder).unwrap();
        assert_eq!(
            graph.markers().next().unwrap().shape,
            MarkerShape::Circle { diameter: 0.2 }
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let result = Assembler::default()
            .with_cancel(token)
            .run(&scene(), &mut loader, &LenDecoder);
        assert_eq!(
            result.unwrap_err(),
            AssembleError::Cancelled {
                completed_parts: 0,
                total_parts: 4
            }
        );
    }

    #[test]
    fn test_cancel_mid_assembly() {
        let token = CancelToken::new();
        let observer = token.clone();
        let mut loads = 0;
        let mut cancelling = |g: &GeometryDefinition| {
            loads += 1;
            observer.cancel();
            loader(g)
        };
        let result = Assembler::default()
            .with_cancel(token)
            .run(&scene(), &mut cancelling, &LenDecoder);
        assert!(matches!(
            result,
            Err(AssembleError::Cancelled { completed_parts: 1, .. })
        ));
        assert_eq!(loads, 1);
    }

    #[test]
    fn test_joints_pass_through() {
        let mut s = scene();
        s.joints = vec![luminaire_types::Joint {
            part_name: "hinge".into(),
            ..Default::default()
        }];
        let graph = assemble(&s, &mut loader, &LenDecoder);
        assert_eq!(graph.joints, s.joints);
    }
}
