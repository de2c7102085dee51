//! Style normalizer (§4.1): raw SWF style records -> render-ready styles.
//!
//! Grounded on `swf_runtime/morph_shape.rs`'s `lerp_fill`/`lerp_line` match
//! arms for the fill/line-kind table, and on the matrix pre-scale constants
//! documented in `render/tessellator.rs`'s gradient/bitmap uniform setup.

use crate::bitmap::BitmapDependencies;
use crate::error::DecodeError;
use crate::model::{
    Color, FillStyle, Gradient, GradientStop, LineCapStyle, LineJoinStyle, LineStyle, Matrix,
    MorphFillStyle, MorphLineStyle,
};
use crate::raw::{self, BitmapFillType, RawFillStyle, RawGradient, RawLineStyle, RawMatrix};

/// SWF's gradient matrix is expressed in the fixed gradient-square space,
/// not twips; this is the factor that brings its a/b/c/d into the same
/// pixel space as everything else (§4.1).
const GRADIENT_MATRIX_SCALE: f32 = 819.2;
/// Bitmap fill matrices are already twip-denominated; this is the plain
/// twip-to-pixel scale (1/20), applied to a/b/c/d as well as translate.
const BITMAP_MATRIX_SCALE: f32 = 0.05;

fn scale_matrix(raw: &RawMatrix, scale: f32) -> Matrix {
    Matrix {
        a: raw.a * scale,
        b: raw.b * scale,
        c: raw.c * scale,
        d: raw.d * scale,
        tx: raw.tx.get() as f32 / 20.0,
        ty: raw.ty.get() as f32 / 20.0,
    }
}

fn normalize_gradient(raw: &RawGradient) -> Gradient {
    Gradient {
        matrix: scale_matrix(&raw.matrix, GRADIENT_MATRIX_SCALE),
        spread: match raw.spread {
            raw::GradientSpread::Pad => crate::model::GradientSpread::Pad,
            raw::GradientSpread::Reflect => crate::model::GradientSpread::Reflect,
            raw::GradientSpread::Repeat => crate::model::GradientSpread::Repeat,
        },
        interpolation: match raw.interpolation {
            raw::GradientInterpolation::Rgb => crate::model::GradientInterpolation::Rgb,
            raw::GradientInterpolation::LinearRgb => crate::model::GradientInterpolation::LinearRgb,
        },
        stops: raw
            .records
            .iter()
            .map(|record| GradientStop {
                // Wire ratio is a byte fraction of 255, not already [0, 1].
                ratio: record.ratio as f32 / 255.0,
                color: Color::from_u8(
                    record.color.r,
                    record.color.g,
                    record.color.b,
                    record.color.a,
                ),
            })
            .collect(),
    }
}

/// Converts one raw fill style. Fails only for a fill kind this crate
/// doesn't know about (§7); every kind declared in `RawFillStyle` other
/// than `Unknown` converts infallibly.
pub fn normalize_fill(
    raw: &RawFillStyle,
    deps: &mut BitmapDependencies,
) -> Result<FillStyle, DecodeError> {
    Ok(match raw {
        RawFillStyle::Solid(color) => {
            FillStyle::Solid(Color::from_u8(color.r, color.g, color.b, color.a))
        }
        RawFillStyle::LinearGradient(gradient) => {
            FillStyle::LinearGradient(normalize_gradient(gradient))
        }
        RawFillStyle::RadialGradient(gradient) => {
            FillStyle::RadialGradient(normalize_gradient(gradient))
        }
        RawFillStyle::FocalGradient {
            gradient,
            focal_point,
        } => FillStyle::FocalGradient {
            gradient: normalize_gradient(gradient),
            focal_point: *focal_point,
        },
        RawFillStyle::Bitmap {
            bitmap_id,
            matrix,
            fill_type,
        } => {
            let (smooth, repeat) = match fill_type {
                BitmapFillType::Repeating => (true, true),
                BitmapFillType::Clipped => (true, false),
                BitmapFillType::NonSmoothedRepeating => (false, true),
                BitmapFillType::NonSmoothedClipped => (false, false),
            };
            FillStyle::Bitmap {
                bitmap_index: deps.index_for(*bitmap_id),
                matrix: scale_matrix(matrix, BITMAP_MATRIX_SCALE),
                repeat,
                smooth,
            }
        }
        RawFillStyle::Unknown(kind) => {
            return Err(DecodeError::UnsupportedFillKind(format!("{kind:#04x}")));
        }
    })
}

/// Converts one raw line style. `miter_limit` is computed only when the
/// join is `Miter`; other joins carry the spec's flat default (§4.1).
pub fn normalize_line(
    raw: &RawLineStyle,
    deps: &mut BitmapDependencies,
) -> Result<LineStyle, DecodeError> {
    let (join, miter_limit) = match raw.join {
        raw::LineJoinStyle::Round => (LineJoinStyle::Round, 3.0),
        raw::LineJoinStyle::Bevel => (LineJoinStyle::Bevel, 3.0),
        raw::LineJoinStyle::Miter(factor) => {
            let limit = factor.max(1.5) * 2.0;
            (LineJoinStyle::Miter(factor), limit)
        }
        raw::LineJoinStyle::Unknown(kind) => {
            return Err(DecodeError::UnsupportedLineKind(format!("{kind:#04x}")));
        }
    };

    let fill_override = match &raw.fill {
        Some(fill) => Some(normalize_fill(fill, deps)?),
        None => None,
    };

    Ok(LineStyle {
        width: raw.width.get(),
        color: Color::from_u8(raw.color.r, raw.color.g, raw.color.b, raw.color.a),
        start_cap: map_cap(raw.start_cap),
        end_cap: map_cap(raw.end_cap),
        join,
        miter_limit,
        no_h_scale: raw.no_h_scale,
        no_v_scale: raw.no_v_scale,
        pixel_hinting: raw.pixel_hinting,
        fill_override,
    })
}

fn map_cap(cap: raw::LineCapStyle) -> LineCapStyle {
    match cap {
        raw::LineCapStyle::None => LineCapStyle::None,
        raw::LineCapStyle::Round => LineCapStyle::Round,
        raw::LineCapStyle::Square => LineCapStyle::Square,
    }
}

/// Normalizes a start/end fill pair for a morph shape (§3, §4.1): both
/// halves share one dependency set so a bitmap referenced by both frames
/// gets the same shape-local index.
pub fn normalize_fill_pair(
    start: &RawFillStyle,
    end: &RawFillStyle,
    deps: &mut BitmapDependencies,
) -> Result<MorphFillStyle, DecodeError> {
    Ok(MorphFillStyle {
        start: normalize_fill(start, deps)?,
        end: normalize_fill(end, deps)?,
    })
}

pub fn normalize_line_pair(
    start: &RawLineStyle,
    end: &RawLineStyle,
    deps: &mut BitmapDependencies,
) -> Result<MorphLineStyle, DecodeError> {
    Ok(MorphLineStyle {
        start: normalize_line(start, deps)?,
        end: normalize_line(end, deps)?,
    })
}
