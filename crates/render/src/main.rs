//! Generate SVG renders of the fixture luminaires for the README.

use std::fmt::Write as _;
use std::fs;

use luminaire_scene::{assemble, SceneGraph, SceneNode, TriangleMesh};
use luminaire_types::PhotometricDataset;
use photometry::analysis::{beam_angle, luminaire_flux};
use photometry::diagram::{render_with, DiagramMode};
use photometry::{to_svg, DiagramConfig};
use test_harness::helpers::{
    downlight, empty_dataset, linear_luminaire, track_light_assets, track_light_scene, truncated,
};
use test_harness::{CountingLoader, DiagramReport, SceneReport, TextMeshDecoder};

/// Simple isometric projection: 3D -> 2D
fn project(x: f64, y: f64, z: f64) -> (f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_z: f64 = 0.8;
    let rx = x * angle_z.cos() - y * angle_z.sin();
    let ry = x * angle_z.sin() + y * angle_z.cos();
    let pz = ry * angle_x.sin() + z * angle_x.cos();
    (rx, -pz)
}

/// Wireframe of every mesh node, baked to world space, with markers as dots.
fn scene_to_svg(graph: &SceneGraph<TriangleMesh>, width: f64, height: f64, title: &str) -> String {
    let meshes: Vec<TriangleMesh> = graph
        .mesh_nodes()
        .filter_map(|node| graph.baked(node, TriangleMesh::transformed))
        .collect();

    let mut projected: Vec<Vec<(f64, f64)>> = Vec::new();
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for mesh in &meshes {
        let points: Vec<(f64, f64)> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| project(p[0] as f64, p[1] as f64, p[2] as f64))
            .collect();
        for &(px, py) in &points {
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
        projected.push(points);
    }

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"#1a1a2e\"/>\n\
         <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title}</text>\n"
    );
    if projected.iter().all(Vec::is_empty) {
        svg.push_str("</svg>\n");
        return svg;
    }

    let padding = 40.0;
    let scale = ((width - 2.0 * padding) / (max_x - min_x).max(1e-9))
        .min((height - 2.0 * padding - 25.0) / (max_y - min_y).max(1e-9));
    let to_screen = |(px, py): (f64, f64)| {
        (
            padding + (px - min_x) * scale,
            padding + 25.0 + (py - min_y) * scale,
        )
    };

    for (mesh, points) in meshes.iter().zip(&projected) {
        for tri in mesh.indices.chunks_exact(3) {
            let corners: Vec<String> = tri
                .iter()
                .map(|&i| {
                    let (x, y) = to_screen(points[i as usize]);
                    format!("{x:.1},{y:.1}")
                })
                .collect();
            let _ = writeln!(
                svg,
                "<polygon points=\"{}\" fill=\"#4fc3f7\" fill-opacity=\"0.15\" stroke=\"#4fc3f7\" stroke-width=\"1\"/>",
                corners.join(" ")
            );
        }
    }

    for marker in graph.markers() {
        let Some(SceneNode::Mesh(parent)) = graph.nodes.get(marker.parent) else {
            continue;
        };
        let world = parent.transform.transform_point(&marker.position);
        let (x, y) = to_screen(project(world.x, world.y, world.z));
        let _ = writeln!(
            svg,
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"#ffd54f\"/>"
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_diagrams(name: &str, dataset: &PhotometricDataset) {
    for (mode, mode_name) in [(DiagramMode::Polar, "polar"), (DiagramMode::Cartesian, "cartesian")] {
        for (config, theme) in [(DiagramConfig::light(), "light"), (DiagramConfig::dark(), "dark")] {
            let geometry = render_with(dataset, mode, 480.0, 400.0, &config);
            let path = format!("docs/renders/{name}_{mode_name}_{theme}.svg");
            fs::write(&path, to_svg(&geometry)).expect("write diagram svg");
            if theme == "light" {
                print!("{}", DiagramReport::from_geometry(&geometry));
            }
        }
    }
    println!(
        "  flux {:.0} lm, beam {:.0}°\n",
        luminaire_flux(dataset),
        beam_angle(dataset)
    );
}

fn main() {
    fs::create_dir_all("docs/renders").expect("create docs/renders dir");

    println!("=== Diagrams ===");
    write_diagrams("downlight", &downlight());
    write_diagrams("linear", &linear_luminaire());
    write_diagrams("truncated", &truncated());
    write_diagrams("empty", &empty_dataset());

    println!("=== Scenes ===");
    let scene = track_light_scene().expect("parse track light fixture");
    let mut loader = CountingLoader::new(track_light_assets());
    let graph = assemble(&scene, &mut loader, &TextMeshDecoder);
    print!("{}", SceneReport::from_graph(&graph));
    println!("  loads: {}", loader.total_calls());
    let svg = scene_to_svg(&graph, 480.0, 360.0, "Track light (2 heads, shared geometry)");
    fs::write("docs/renders/track_light.svg", svg).expect("write scene svg");
}
