//! SVG serialization of a [`DiagramGeometry`].

use super::{DiagramGeometry, Point2, Primitive};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[Point2]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the diagram as a standalone SVG document, primitives in list order.
pub fn to_svg(geometry: &DiagramGeometry) -> String {
    let (width, height) = (geometry.width, geometry.height);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\" font-family=\"sans-serif\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        geometry.background.hex()
    );

    for primitive in &geometry.primitives {
        svg.push_str("  ");
        svg.push_str(&element(primitive));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// One SVG element for `primitive`, without indentation or newline.
fn element(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Rect {
            origin,
            width,
            height,
            fill,
        } => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
            origin.x,
            origin.y,
            fill.hex()
        ),
        Primitive::Circle {
            center,
            radius,
            stroke,
            stroke_width,
        } => format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{radius:.2}\" fill=\"none\" \
             stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
            center.x,
            center.y,
            stroke.hex()
        ),
        Primitive::Line {
            from,
            to,
            stroke,
            stroke_width,
            dashed,
        } => format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" \
             stroke-width=\"{stroke_width}\"{}/>",
            from.x,
            from.y,
            to.x,
            to.y,
            stroke.hex(),
            if *dashed { " stroke-dasharray=\"4 3\"" } else { "" }
        ),
        Primitive::Path {
            points,
            closed,
            fill,
            stroke,
            stroke_width,
        } => {
            let tag = if *closed { "polygon" } else { "polyline" };
            let fill_attr = match fill {
                Some(f) => format!("fill=\"{}\" fill-opacity=\"{}\"", f.color.hex(), f.opacity),
                None => "fill=\"none\"".to_string(),
            };
            format!(
                "<{tag} points=\"{}\" {fill_attr} stroke=\"{}\" \
                 stroke-width=\"{stroke_width}\" stroke-linejoin=\"round\"/>",
                points_attr(points),
                stroke.hex()
            )
        }
        Primitive::Text {
            position,
            text,
            size,
            color,
            anchor,
        } => format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{size}\" fill=\"{}\" \
             text-anchor=\"{}\">{}</text>",
            position.x,
            position.y,
            color.hex(),
            anchor.svg_name(),
            escape(text)
        ),
    }
}
