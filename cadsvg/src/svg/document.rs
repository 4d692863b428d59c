//! Assembling the full SVG document tree (§4.8): the fixed outer-to-inner
//! group layout, the surface group, the edge-class groups, and the
//! projected coordinate-system glyph.

use std::collections::HashMap;

use crate::scene::{EdgeVisibilityClass, PlanarCoordinateFrame, PlanarMeshRepresentation};
use crate::style::{ArrowStyle, CoordSystemStyle, FaceStyle, LineStyle};

use super::element::{attrs, Attrs, Node};

/// Global scale, zoom, and user margins applied around the projected
/// geometry, plus whether the coordinate-system glyph is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageConfig {
    pub scale: (f64, f64),
    pub zoom: (f64, f64),
    pub margin: (f64, f64),
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            scale: (1.0, 1.0),
            zoom: (1.0, 1.0),
            margin: (10.0, 10.0),
        }
    }
}

/// Everything the emitter needs beyond the projected scene itself.
pub struct DocumentStyles {
    pub face: FaceStyle,
    pub lines: HashMap<EdgeVisibilityClass, LineStyle>,
    pub coord_system: Option<CoordSystemStyle>,
    pub image: ImageConfig,
}

/// Build the full element tree for one rendered part. Returns `None` only
/// when the projected scene has no geometry at all (empty bounding box).
pub fn build_document(
    planar: &PlanarMeshRepresentation,
    edge_groups: &[crate::scene::PlanarEdgesRepresentation],
    coord_frame: &PlanarCoordinateFrame,
    styles: &DocumentStyles,
) -> Option<Node> {
    let bbox = planar.bounding_box()?;

    let coord_margin = styles
        .coord_system
        .as_ref()
        .map(|c| c.margin)
        .unwrap_or(0.0);

    let width = (bbox.extent_x() * styles.image.zoom.0
        + 2.0 * styles.image.margin.0
        + 2.0 * coord_margin)
        * styles.image.scale.0;
    let height = (bbox.extent_y() * styles.image.zoom.1
        + 2.0 * styles.image.margin.1
        + 2.0 * coord_margin)
        * styles.image.scale.1;

    let surface_group = build_surface_group(planar, &styles.face);
    let edge_groups_node = build_edge_groups(edge_groups, &styles.lines);

    let geometry_group = Node::group(
        transform_attr(format!(
            "scale(1, -1) translate({}, {})",
            -bbox.min_x, -bbox.min_y
        )),
        vec![surface_group, edge_groups_node],
    );

    let bbox_group = Node::group(
        transform_attr(format!(
            "translate({}, {}) scale({}, {})",
            styles.image.margin.0, styles.image.margin.1, styles.image.zoom.0, styles.image.zoom.1
        )),
        vec![geometry_group],
    );

    let margin_group = Node::group(
        transform_attr(format!("translate({}, {})", coord_margin, coord_margin)),
        vec![bbox_group],
    );

    let mut scale_group_children = vec![margin_group];
    if let Some(coord_style) = &styles.coord_system {
        scale_group_children.push(build_coordinate_system_group(coord_frame, coord_style));
    }

    let scale_group = Node::group(
        transform_attr(format!(
            "scale({}, {})",
            styles.image.scale.0, styles.image.scale.1
        )),
        scale_group_children,
    );

    Some(Node::svg(
        attrs([
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
        ]),
        vec![scale_group],
    ))
}

fn transform_attr(transform: String) -> Attrs {
    attrs([("transform", transform)])
}

fn build_surface_group(planar: &PlanarMeshRepresentation, face_style: &FaceStyle) -> Node {
    let polygons = planar
        .facets()
        .map(|facet| {
            let points = facet
                .points
                .iter()
                .map(|(x, y)| format!("{},{}", x, y))
                .collect::<Vec<_>>()
                .join(" ");
            let mut a = attrs([
                ("points", points),
                ("fill", facet.color.to_rgb_css()),
                ("fillopacity", facet.color.opacity().to_string()),
                ("stroke", face_style.stroke_color.to_rgb_css()),
                ("strokewidth", face_style.width.to_string()),
                ("strokelinejoin", "round".to_string()),
            ]);
            a.insert("strokedasharray".to_string(), dash_value(&face_style.dash));
            Node::polygon(a)
        })
        .collect();
    Node::group(Attrs::new(), polygons)
}

fn build_edge_groups(
    edge_groups: &[crate::scene::PlanarEdgesRepresentation],
    line_styles: &HashMap<EdgeVisibilityClass, LineStyle>,
) -> Node {
    let mut children = Vec::new();
    for class in EdgeVisibilityClass::ALL {
        let Some(group) = edge_groups.iter().find(|g| g.class == class) else {
            continue;
        };
        if group.edges.is_empty() {
            continue;
        }
        let Some(style) = line_styles.get(&class) else {
            continue;
        };

        let paths = group
            .edges
            .iter()
            .map(|edge| {
                let d = path_data(&edge.points);
                let mut a = attrs([
                    ("d", d),
                    ("stroke", style.color.to_rgb_css()),
                    ("strokewidth", style.width.to_string()),
                    ("strokelinejoin", "round".to_string()),
                    ("strokelinecap", "round".to_string()),
                    ("fill", "none".to_string()),
                ]);
                a.insert("strokedasharray".to_string(), dash_value(&style.dash));
                Node::path(a)
            })
            .collect();

        children.push(Node::group(Attrs::new(), paths));
    }
    Node::group(Attrs::new(), children)
}

fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            d.push_str(&format!("M {},{}", x, y));
        } else {
            d.push_str(&format!(" L {},{}", x, y));
        }
    }
    d
}

fn dash_value(dash: &Option<Vec<u32>>) -> String {
    match dash {
        Some(values) => values
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(","),
        None => "1,0".to_string(),
    }
}

fn build_coordinate_system_group(frame: &PlanarCoordinateFrame, style: &CoordSystemStyle) -> Node {
    let mut children = Vec::new();
    for (tip, axis_style) in [
        (frame.x_tip, &style.x),
        (frame.y_tip, &style.y),
        (frame.z_tip, &style.z),
    ] {
        if PlanarCoordinateFrame::is_axis_finite(tip) {
            children.push(build_arrow(frame.origin, tip, axis_style));
        }
    }
    let anchor = (style.size, style.size);
    Node::group(
        transform_attr(format!("translate({}, {})", anchor.0, anchor.1)),
        children,
    )
}

fn build_arrow(origin: (f64, f64), tip: (f64, f64), style: &ArrowStyle) -> Node {
    let (dx, dy) = (tip.0 - origin.0, tip.1 - origin.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return Node::group(Attrs::new(), vec![]);
    }
    let (ux, uy) = (dx / len, dy / len);
    let (nx, ny) = (-uy, ux);

    let shaft_end = (tip.0 - ux * style.head_length, tip.1 - uy * style.head_length);
    let base_left = (
        shaft_end.0 + nx * style.head_width / 2.0,
        shaft_end.1 + ny * style.head_width / 2.0,
    );
    let base_right = (
        shaft_end.0 - nx * style.head_width / 2.0,
        shaft_end.1 - ny * style.head_width / 2.0,
    );

    let shaft = Node::line(attrs([
        ("x1", origin.0.to_string()),
        ("y1", origin.1.to_string()),
        ("x2", shaft_end.0.to_string()),
        ("y2", shaft_end.1.to_string()),
        ("stroke", style.color.to_rgb_css()),
        ("strokewidth", style.stroke_width.to_string()),
    ]));

    let head_points = format!(
        "{},{} {},{} {},{}",
        tip.0, tip.1, base_left.0, base_left.1, base_right.0, base_right.1
    );
    let head = Node::polygon(attrs([
        ("points", head_points),
        ("fill", style.color.to_rgb_css()),
    ]));

    let mut children = vec![shaft, head];
    if let Some(label) = &style.label {
        // Offset the label opposite the shaft's own quadrant so it doesn't
        // overlap the arrow it names.
        let sign_x = if ux >= 0.0 { 1.0 } else { -1.0 };
        let sign_y = if uy >= 0.0 { 1.0 } else { -1.0 };
        let label_pos = (
            tip.0 + sign_x * style.font_size,
            tip.1 + sign_y * style.font_size,
        );
        children.push(Node::text(
            attrs([
                ("x", label_pos.0.to_string()),
                ("y", label_pos.1.to_string()),
                ("fill", style.color.to_rgb_css()),
                ("fontsize", format!("{}pt", style.font_size)),
            ]),
            label.clone(),
        ));
    }

    Node::group(Attrs::new(), children)
}
