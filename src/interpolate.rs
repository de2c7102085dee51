//! Render-time interpolation helper (§4.4, §10.4) — optional.
//!
//! Resolves a `MorphShape` to a concrete `Shape` at a given ratio. This
//! is a convenience for callers with no tweening logic of their own; it
//! consumes only already-decoded data and has no bearing on `decode`
//! itself.
//!
//! Grounded on `swf_runtime/morph_shape.rs`'s `lerp_color`/`lerp_twips`/
//! `lerp_matrix`/`lerp_gradient` helpers, generalized from "bake one
//! render frame" into "resolve one shape at a ratio".

use crate::model::{
    Color, Command, FillStyle, Gradient, GradientStop, LineStyle, Matrix, MorphCommand,
    MorphFillStyle, MorphLineStyle, MorphPath, MorphPathStyle, MorphShape, Path, PathStyle, Shape,
};
use crate::twips::{Point, Twips};

fn lerp_f32(a: f32, b: f32, ratio: f32) -> f32 {
    a * (1.0 - ratio) + b * ratio
}

pub fn lerp_twips(a: Twips, b: Twips, ratio: f32) -> Twips {
    Twips::new(lerp_f32(a.get() as f32, b.get() as f32, ratio).round() as i32)
}

fn lerp_point(a: Point, b: Point, ratio: f32) -> Point {
    Point {
        x: lerp_twips(a.x, b.x, ratio),
        y: lerp_twips(a.y, b.y, ratio),
    }
}

pub fn lerp_color(a: Color, b: Color, ratio: f32) -> Color {
    Color {
        r: lerp_f32(a.r, b.r, ratio),
        g: lerp_f32(a.g, b.g, ratio),
        b: lerp_f32(a.b, b.b, ratio),
        a: lerp_f32(a.a, b.a, ratio),
    }
}

fn lerp_matrix(a: Matrix, b: Matrix, ratio: f32) -> Matrix {
    Matrix {
        a: lerp_f32(a.a, b.a, ratio),
        b: lerp_f32(a.b, b.b, ratio),
        c: lerp_f32(a.c, b.c, ratio),
        d: lerp_f32(a.d, b.d, ratio),
        tx: lerp_f32(a.tx, b.tx, ratio),
        ty: lerp_f32(a.ty, b.ty, ratio),
    }
}

fn lerp_gradient(a: &Gradient, b: &Gradient, ratio: f32) -> Gradient {
    Gradient {
        matrix: lerp_matrix(a.matrix, b.matrix, ratio),
        // Spread/interpolation mode can't be tweened; the start frame's
        // choice holds for the whole tween, matching the teacher's
        // `lerp_gradient`.
        spread: a.spread,
        interpolation: a.interpolation,
        stops: a
            .stops
            .iter()
            .zip(&b.stops)
            .map(|(sa, sb)| GradientStop {
                ratio: lerp_f32(sa.ratio, sb.ratio, ratio),
                color: lerp_color(sa.color, sb.color, ratio),
            })
            .collect(),
    }
}

fn lerp_fill(a: &FillStyle, b: &FillStyle, ratio: f32) -> FillStyle {
    match (a, b) {
        (FillStyle::Solid(ca), FillStyle::Solid(cb)) => {
            FillStyle::Solid(lerp_color(*ca, *cb, ratio))
        }
        (FillStyle::LinearGradient(ga), FillStyle::LinearGradient(gb)) => {
            FillStyle::LinearGradient(lerp_gradient(ga, gb, ratio))
        }
        (FillStyle::RadialGradient(ga), FillStyle::RadialGradient(gb)) => {
            FillStyle::RadialGradient(lerp_gradient(ga, gb, ratio))
        }
        (
            FillStyle::FocalGradient {
                gradient: ga,
                focal_point: fa,
            },
            FillStyle::FocalGradient {
                gradient: gb,
                focal_point: fb,
            },
        ) => FillStyle::FocalGradient {
            gradient: lerp_gradient(ga, gb, ratio),
            focal_point: lerp_f32(*fa, *fb, ratio),
        },
        (
            FillStyle::Bitmap {
                bitmap_index,
                matrix: ma,
                repeat,
                smooth,
            },
            FillStyle::Bitmap { matrix: mb, .. },
        ) => FillStyle::Bitmap {
            bitmap_index: *bitmap_index,
            matrix: lerp_matrix(*ma, *mb, ratio),
            repeat: *repeat,
            smooth: *smooth,
        },
        // Mismatched kinds can't occur from `normalize_fill_pair` (§4.1
        // normalizes both sides of the same raw style independently, but
        // callers constructing a `MorphFillStyle` by hand could still
        // mismatch them); hold the start frame rather than panic.
        (fallback, _) => fallback.clone(),
    }
}

fn lerp_line(a: &LineStyle, b: &LineStyle, ratio: f32) -> LineStyle {
    LineStyle {
        width: lerp_f32(a.width as f32, b.width as f32, ratio).round() as i32,
        color: lerp_color(a.color, b.color, ratio),
        start_cap: a.start_cap,
        end_cap: a.end_cap,
        join: a.join,
        miter_limit: lerp_f32(a.miter_limit, b.miter_limit, ratio),
        no_h_scale: a.no_h_scale,
        no_v_scale: a.no_v_scale,
        pixel_hinting: a.pixel_hinting,
        fill_override: match (&a.fill_override, &b.fill_override) {
            (Some(fa), Some(fb)) => Some(lerp_fill(fa, fb, ratio)),
            (Some(fa), None) => Some(fa.clone()),
            (None, _) => None,
        },
    }
}

fn lerp_command(command: &MorphCommand, ratio: f32) -> Command {
    match *command {
        MorphCommand::MoveTo { p0, p1 } => Command::MoveTo(lerp_point(p0, p1, ratio)),
        MorphCommand::LineTo { p0, p1 } => Command::LineTo(lerp_point(p0, p1, ratio)),
        MorphCommand::CurveTo {
            control0,
            control1,
            p0,
            p1,
        } => Command::CurveTo {
            control: lerp_point(control0, control1, ratio),
            anchor: lerp_point(p0, p1, ratio),
        },
    }
}

fn lerp_path(path: &MorphPath, ratio: f32) -> Path {
    let style = match &path.style {
        MorphPathStyle::Fill(MorphFillStyle { start, end }) => {
            PathStyle::Fill(lerp_fill(start, end, ratio))
        }
        MorphPathStyle::Line(MorphLineStyle { start, end }) => {
            PathStyle::Line(lerp_line(start, end, ratio))
        }
    };
    Path {
        commands: path.commands.iter().map(|c| lerp_command(c, ratio)).collect(),
        style,
    }
}

/// Resolves `shape` to a concrete `Shape` at `ratio` (0.0 = start frame,
/// 1.0 = end frame), applying §4.4's `lerp` formula component-wise.
pub fn morph_shape_at(shape: &MorphShape, ratio: f32) -> Shape {
    Shape {
        paths: shape.paths.iter().map(|p| lerp_path(p, ratio)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_twips_rounds_to_nearest() {
        assert_eq!(lerp_twips(Twips::new(0), Twips::new(100), 0.5), Twips::new(50));
        assert_eq!(lerp_twips(Twips::new(0), Twips::new(3), 1.0 / 3.0), Twips::new(1));
    }

    #[test]
    fn lerp_color_at_endpoints_matches_inputs() {
        let a = Color::from_u8(255, 0, 0, 255);
        let b = Color::from_u8(0, 0, 255, 255);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        let mid = lerp_color(a, b, 0.5);
        assert_relative_eq!(mid.r, 0.5);
        assert_relative_eq!(mid.b, 0.5);
    }

    #[test]
    fn morph_shape_at_zero_matches_start_frame_geometry() {
        let shape = MorphShape {
            paths: vec![MorphPath {
                commands: vec![
                    MorphCommand::MoveTo {
                        p0: Point::ZERO,
                        p1: Point::from_twips(10, 10),
                    },
                    MorphCommand::LineTo {
                        p0: Point::from_twips(100, 0),
                        p1: Point::from_twips(110, 10),
                    },
                ],
                style: MorphPathStyle::Fill(MorphFillStyle {
                    start: FillStyle::Solid(Color::from_u8(255, 0, 0, 255)),
                    end: FillStyle::Solid(Color::from_u8(0, 255, 0, 255)),
                }),
            }],
        };
        let resolved = morph_shape_at(&shape, 0.0);
        assert_eq!(resolved.paths[0].commands[0], Command::MoveTo(Point::ZERO));
        assert_eq!(
            resolved.paths[0].commands[1],
            Command::LineTo(Point::from_twips(100, 0))
        );
    }
}
