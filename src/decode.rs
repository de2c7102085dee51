//! Top-level decode entry points (§2): wires the style normalizer, the
//! segment emitter, and the contour reconstructor together.

use crate::bitmap::BitmapDependencies;
use crate::contour;
use crate::error::DecodeError;
use crate::model::{
    Command, MorphCommand, MorphLineStyle, MorphPath, MorphPathStyle, MorphShape, Path, PathStyle,
    Shape,
};
use crate::raw::{DefineMorphShapeTag, DefineShapeTag};
use crate::segment::{self, FlatLayer, FlatSegment, MorphLayer, MorphSegment};

/// Decodes a `DefineShape` tag into a render-ready `Shape` (§2, §8).
///
/// `deps` accumulates the bitmap ids this shape references; callers
/// share one `BitmapDependencies` per shape across repeated decodes only
/// if they want indices to stay stable, per §5.
pub fn decode_shape(
    tag: &DefineShapeTag,
    deps: &mut BitmapDependencies,
) -> Result<Shape, DecodeError> {
    let (layers, default_path) = segment::emit_flat(&tag.styles, &tag.records, deps)?;

    let mut paths = Vec::new();
    for layer in &layers {
        append_flat_layer_paths(layer, &mut paths);
    }
    if let Some(default_path) = default_path {
        if !default_path.is_empty() {
            let hairline = crate::model::LineStyle::default_hairline();
            paths.push(flat_path(default_path, PathStyle::Line(hairline)));
        }
    }
    Ok(Shape { paths })
}

fn append_flat_layer_paths(layer: &FlatLayer, paths: &mut Vec<Path>) {
    for (fill, bucket) in layer.fills.iter().zip(layer.fill_buckets()) {
        if bucket.is_empty() {
            continue;
        }
        paths.push(flat_path(bucket.clone(), PathStyle::Fill(fill.clone())));
    }
    for (line, bucket) in layer.lines.iter().zip(layer.line_buckets()) {
        if bucket.is_empty() {
            continue;
        }
        paths.push(flat_path(bucket.clone(), PathStyle::Line(line.clone())));
    }
}

fn flat_path(bucket: Vec<FlatSegment>, style: PathStyle) -> Path {
    let commands: Vec<Command> = contour::reconstruct(bucket);
    Path { commands, style }
}

/// Decodes a `DefineMorphShape` tag into a `MorphShape` (§2, §4.4, §8).
pub fn decode_morph_shape(
    tag: &DefineMorphShapeTag,
    deps: &mut BitmapDependencies,
) -> Result<MorphShape, DecodeError> {
    let (layers, default_path) = segment::emit_morph(
        &tag.start_styles,
        &tag.end_styles,
        &tag.records,
        &tag.records_end,
        deps,
    )?;

    let mut paths = Vec::new();
    for layer in &layers {
        append_morph_layer_paths(layer, &mut paths);
    }
    if let Some(default_path) = default_path {
        if !default_path.is_empty() {
            let hairline = crate::model::LineStyle::default_hairline();
            paths.push(morph_path(
                default_path,
                MorphPathStyle::Line(MorphLineStyle {
                    start: hairline.clone(),
                    end: hairline,
                }),
            ));
        }
    }
    Ok(MorphShape { paths })
}

fn append_morph_layer_paths(layer: &MorphLayer, paths: &mut Vec<MorphPath>) {
    for (fill, bucket) in layer.fills.iter().zip(layer.fill_buckets()) {
        if bucket.is_empty() {
            continue;
        }
        paths.push(morph_path(bucket.clone(), MorphPathStyle::Fill(fill.clone())));
    }
    for (line, bucket) in layer.lines.iter().zip(layer.line_buckets()) {
        if bucket.is_empty() {
            continue;
        }
        paths.push(morph_path(bucket.clone(), MorphPathStyle::Line(line.clone())));
    }
}

fn morph_path(bucket: Vec<MorphSegment>, style: MorphPathStyle) -> MorphPath {
    let commands: Vec<MorphCommand> = contour::reconstruct(bucket);
    MorphPath { commands, style }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{
        EdgeRecord, RawColor, RawFillStyle, Rectangle, ShapeFlags, ShapeRecord, ShapeStyles,
        StyleChangeRecord,
    };
    use crate::twips::{Point, Twips};
    use pretty_assertions::assert_eq;

    fn straight(dx: i32, dy: i32) -> ShapeRecord {
        ShapeRecord::Edge(EdgeRecord::StraightEdge {
            delta_x: Twips::new(dx),
            delta_y: Twips::new(dy),
        })
    }

    #[test]
    fn single_triangle_solid_fill() {
        let tag = DefineShapeTag {
            id: 1,
            bounds: Rectangle::default(),
            flags: ShapeFlags::empty(),
            styles: ShapeStyles {
                fill_styles: vec![RawFillStyle::Solid(RawColor::rgb(255, 0, 0))],
                line_styles: vec![],
            },
            records: vec![
                ShapeRecord::StyleChange(StyleChangeRecord {
                    fill_style_1: Some(1),
                    move_to: Some(Point::ZERO),
                    ..Default::default()
                }),
                straight(100, 0),
                straight(0, 100),
                straight(-100, -100),
            ],
        };
        let mut deps = BitmapDependencies::new();
        let shape = decode_shape(&tag, &mut deps).unwrap();

        assert_eq!(shape.paths.len(), 1);
        let path = &shape.paths[0];
        assert!(matches!(path.style, PathStyle::Fill(crate::model::FillStyle::Solid(_))));
        assert_eq!(
            path.commands,
            vec![
                Command::MoveTo(Point::ZERO),
                Command::LineTo(Point::from_twips(100, 0)),
                Command::LineTo(Point::from_twips(100, 100)),
                Command::LineTo(Point::ZERO),
            ]
        );
    }

    #[test]
    fn two_adjacent_squares_share_a_reversed_edge() {
        let styles = ShapeStyles {
            fill_styles: vec![
                RawFillStyle::Solid(RawColor::rgb(255, 0, 0)),
                RawFillStyle::Solid(RawColor::rgb(0, 255, 0)),
            ],
            line_styles: vec![],
        };
        // Square A: (0,0)-(100,0)-(100,100)-(0,100), fill 1. Square B:
        // (100,0)-(200,0)-(200,100)-(100,100), fill 2. The (100,0)-(100,100)
        // edge is drawn once, as part of A's loop, with both fills active
        // (rightFill=1, leftFill=2) — B's matching edge is never drawn
        // again, it's reconstructed from the reversed clone.
        let records = vec![
            ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style_1: Some(1),
                move_to: Some(Point::ZERO),
                ..Default::default()
            }),
            straight(100, 0), // top of A
            ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style_0: Some(2),
                ..Default::default()
            }),
            straight(0, 100), // shared edge
            ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style_0: Some(0),
                ..Default::default()
            }),
            straight(-100, 0), // bottom of A
            straight(0, -100), // left of A
            ShapeRecord::StyleChange(StyleChangeRecord {
                fill_style_1: Some(2),
                move_to: Some(Point::from_twips(100, 0)),
                ..Default::default()
            }),
            straight(100, 0), // top of B
            straight(0, 100), // right of B
            straight(-100, 0), // bottom of B
        ];
        let tag = DefineShapeTag {
            id: 2,
            bounds: Rectangle::default(),
            flags: ShapeFlags::empty(),
            styles,
            records,
        };
        let mut deps = BitmapDependencies::new();
        let shape = decode_shape(&tag, &mut deps).unwrap();
        assert_eq!(shape.paths.len(), 2);
        for path in &shape.paths {
            assert!(matches!(path.commands[0], Command::MoveTo(_)));
            assert_eq!(path.commands.len(), 5, "each square closes in 4 edges");
            assert_eq!(path.commands[0].end_point(), path.commands.last().unwrap().end_point());
        }
        // The shared edge appears in both buckets with opposite orientation.
        let square_a = &shape.paths[0].commands;
        let square_b = &shape.paths[1].commands;
        let shared_in_a = square_a.contains(&Command::LineTo(Point::from_twips(100, 100)))
            && square_a[0] == Command::MoveTo(Point::ZERO);
        assert!(shared_in_a);
        assert!(square_b
            .iter()
            .any(|c| *c == Command::LineTo(Point::from_twips(100, 0))));
    }

    #[test]
    fn default_path_fallback_produces_a_hairline() {
        let tag = DefineShapeTag {
            id: 3,
            bounds: Rectangle::default(),
            flags: ShapeFlags::empty(),
            styles: ShapeStyles::default(),
            records: vec![
                ShapeRecord::StyleChange(StyleChangeRecord {
                    move_to: Some(Point::ZERO),
                    ..Default::default()
                }),
                straight(50, 0),
            ],
        };
        let mut deps = BitmapDependencies::new();
        let shape = decode_shape(&tag, &mut deps).unwrap();
        assert_eq!(shape.paths.len(), 1);
        match &shape.paths[0].style {
            PathStyle::Line(line) => {
                assert_eq!(line.width, 20);
                assert_eq!(line.color, crate::model::Color::TRANSPARENT);
            }
            _ => panic!("expected a line path"),
        }
        assert_eq!(
            shape.paths[0].commands,
            vec![
                Command::MoveTo(Point::ZERO),
                Command::LineTo(Point::from_twips(50, 0)),
            ]
        );
    }
}
