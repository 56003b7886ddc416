//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context string passed in and shows expected vs
//! actual values.

use luminaire_scene::{SceneGraph, Transform};
use photometry::diagram::DiagramGeometry;

use crate::helpers::{CountingLoader, HarnessError};

fn fail(ctx: &str, detail: String) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!("[{ctx}] {detail}"),
    }
}

/// Assert every curve of a diagram starts and ends on the same point.
pub fn assert_closed_curves(geometry: &DiagramGeometry, ctx: &str) -> Result<(), HarnessError> {
    for (i, curve) in geometry.curves().iter().enumerate() {
        match (curve.first(), curve.last()) {
            (Some(first), Some(last)) if curve.len() >= 2 && first == last => {}
            (first, last) => {
                return Err(fail(
                    ctx,
                    format!(
                        "curve {i} ({} points) is open: first {first:?}, last {last:?}",
                        curve.len()
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Assert the diagram shows exactly `expected` curves.
pub fn assert_curve_count(
    geometry: &DiagramGeometry,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = geometry.curves().len();
    if actual == expected {
        Ok(())
    } else {
        Err(fail(ctx, format!("expected {expected} curves, got {actual}")))
    }
}

/// Assert a transform matches `expected` entry by entry within `tol`.
pub fn assert_transform_eq(
    actual: &Transform,
    expected: &[f64; 16],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    for (i, (a, e)) in actual.m.iter().zip(expected).enumerate() {
        if (a - e).abs() > tol {
            return Err(fail(
                ctx,
                format!("matrix entry {i}: expected {e}, got {a} (tol={tol})"),
            ));
        }
    }
    Ok(())
}

/// Assert node names, meshes and markers together, in graph order.
pub fn assert_node_names<M>(
    graph: &SceneGraph<M>,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual: Vec<&str> = graph.nodes.iter().map(|n| n.name()).collect();
    if actual == expected {
        Ok(())
    } else {
        Err(fail(ctx, format!("expected nodes {expected:?}, got {actual:?}")))
    }
}

/// Assert `geometry_id` was requested from the loader exactly `expected` times.
pub fn assert_load_count(
    loader: &CountingLoader,
    geometry_id: &str,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = loader.calls(geometry_id);
    if actual == expected {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!("geometry '{geometry_id}' loaded {actual} times, expected {expected}"),
        ))
    }
}

/// Assert every buffer the loader handed out has been dropped.
pub fn assert_buffers_released(loader: &CountingLoader, ctx: &str) -> Result<(), HarnessError> {
    match loader.outstanding() {
        0 => Ok(()),
        n => Err(fail(ctx, format!("{n} mesh buffers still held"))),
    }
}
