//! Segment emitter (§4.2): walks an edge-record stream, tracking the pen
//! and the three active style slots, and files oriented segments into
//! per-style buckets.
//!
//! Grounded on `swf_runtime/shape_utils.rs`'s `ShapeConverter` (pen/active
//! style tracking, fill/line bucket population) and on
//! `swf_runtime/morph_shape.rs`'s `build_morph_frame` (the paired
//! start/end record walk, including its cursor-desync handling).

use crate::bitmap::BitmapDependencies;
use crate::contour::EdgeSegment;
use crate::error::DecodeError;
use crate::model::{Command, FillStyle, LineStyle, MorphCommand, MorphFillStyle, MorphLineStyle};
use crate::raw::{EdgeRecord, ShapeRecord, ShapeStyles};
use crate::style;
use crate::twips::Point;

/// One oriented edge in a flat shape's bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlatSegment {
    start: Point,
    end: Point,
    control: Option<Point>,
}

impl EdgeSegment for FlatSegment {
    type Command = Command;

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn flip(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    fn move_to(&self) -> Command {
        Command::MoveTo(self.start)
    }

    fn draw_to(&self) -> Command {
        match self.control {
            Some(control) => Command::CurveTo {
                control,
                anchor: self.end,
            },
            None => Command::LineTo(self.end),
        }
    }
}

fn resolve_edge(pen: Point, edge: &EdgeRecord) -> FlatSegment {
    match *edge {
        EdgeRecord::StraightEdge { delta_x, delta_y } => FlatSegment {
            start: pen,
            end: Point {
                x: pen.x + delta_x,
                y: pen.y + delta_y,
            },
            control: None,
        },
        EdgeRecord::CurvedEdge {
            control_delta_x,
            control_delta_y,
            anchor_delta_x,
            anchor_delta_y,
        } => {
            let control = Point {
                x: pen.x + control_delta_x,
                y: pen.y + control_delta_y,
            };
            FlatSegment {
                start: pen,
                end: Point {
                    x: control.x + anchor_delta_x,
                    y: control.y + anchor_delta_y,
                },
                control: Some(control),
            }
        }
    }
}

/// One oriented edge in a morph shape's bucket: every point carries both
/// a start-frame and an end-frame value (§3). `start()`/`end()` expose
/// only the start-frame side — start-frame topology drives the contour
/// graph (§4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MorphSegment {
    start0: Point,
    end0: Point,
    control0: Option<Point>,
    start1: Point,
    end1: Point,
    control1: Option<Point>,
}

impl EdgeSegment for MorphSegment {
    type Command = MorphCommand;

    fn start(&self) -> Point {
        self.start0
    }

    fn end(&self) -> Point {
        self.end0
    }

    fn flip(&mut self) {
        std::mem::swap(&mut self.start0, &mut self.end0);
        std::mem::swap(&mut self.start1, &mut self.end1);
    }

    fn move_to(&self) -> MorphCommand {
        MorphCommand::MoveTo {
            p0: self.start0,
            p1: self.start1,
        }
    }

    fn draw_to(&self) -> MorphCommand {
        match (self.control0, self.control1) {
            (Some(control0), Some(control1)) => MorphCommand::CurveTo {
                control0,
                control1,
                p0: self.end0,
                p1: self.end1,
            },
            _ => MorphCommand::LineTo {
                p0: self.end0,
                p1: self.end1,
            },
        }
    }
}

/// If exactly one side of a tweened edge pair is a curve, promotes the
/// straight side into a degenerate curve whose control is its own
/// midpoint (§4.2), so both sides share the curve kind.
fn promote_degenerate_pair(
    mut start_edge: FlatSegment,
    mut end_edge: FlatSegment,
) -> (FlatSegment, FlatSegment) {
    match (start_edge.control, end_edge.control) {
        (None, Some(_)) => start_edge.control = Some(start_edge.start.midpoint(start_edge.end)),
        (Some(_), None) => end_edge.control = Some(end_edge.start.midpoint(end_edge.end)),
        _ => {}
    }
    (start_edge, end_edge)
}

/// A snapshot of the fill/line tables active between two `HasNewStyles`
/// events (§4.2 "style layer"), together with the per-style buckets that
/// accumulate during this layer's lifetime.
pub(crate) struct Layer<F, L, S> {
    pub(crate) fills: Vec<F>,
    pub(crate) lines: Vec<L>,
    fill_buckets: Vec<Vec<S>>,
    line_buckets: Vec<Vec<S>>,
}

pub(crate) type FlatLayer = Layer<FillStyle, LineStyle, FlatSegment>;
pub(crate) type MorphLayer = Layer<MorphFillStyle, MorphLineStyle, MorphSegment>;

fn index_bucket<T>(
    buckets: &mut [Vec<T>],
    style_index: u32,
    len: usize,
) -> Result<&mut Vec<T>, DecodeError> {
    match (style_index as usize).checked_sub(1) {
        Some(i) if i < len => Ok(&mut buckets[i]),
        _ => Err(DecodeError::MalformedInput {
            index: style_index,
            len,
        }),
    }
}

impl<F, L, S> Layer<F, L, S> {
    fn new(fills: Vec<F>, lines: Vec<L>) -> Self {
        let fill_buckets = fills.iter().map(|_| Vec::new()).collect();
        let line_buckets = lines.iter().map(|_| Vec::new()).collect();
        Self {
            fills,
            lines,
            fill_buckets,
            line_buckets,
        }
    }

    pub(crate) fn fill_buckets(&self) -> &[Vec<S>] {
        &self.fill_buckets
    }

    pub(crate) fn line_buckets(&self) -> &[Vec<S>] {
        &self.line_buckets
    }
}

impl<F, L, S: Copy> Layer<F, L, S> {
    /// Files one edge's segment(s) according to §4.3's ordering table:
    /// `rightFill` always forward, `leftFill` always reversed, `line`
    /// always forward. Each active slot gets an independent copy.
    fn push_active(&mut self, left: u32, right: u32, line: u32, seg: S) -> Result<(), DecodeError>
    where
        S: EdgeSegment,
    {
        if right != 0 {
            self.fill_bucket(right)?.push(seg);
        }
        if left != 0 {
            let mut reversed = seg;
            reversed.flip();
            self.fill_bucket(left)?.push(reversed);
        }
        if line != 0 {
            self.line_bucket(line)?.push(seg);
        }
        Ok(())
    }

    fn fill_bucket(&mut self, style_index: u32) -> Result<&mut Vec<S>, DecodeError> {
        let len = self.fills.len();
        index_bucket(&mut self.fill_buckets, style_index, len)
    }

    fn line_bucket(&mut self, style_index: u32) -> Result<&mut Vec<S>, DecodeError> {
        let len = self.lines.len();
        index_bucket(&mut self.line_buckets, style_index, len)
    }
}

impl FlatLayer {
    fn from_raw(styles: &ShapeStyles, deps: &mut BitmapDependencies) -> Result<Self, DecodeError> {
        let fills = styles
            .fill_styles
            .iter()
            .map(|f| style::normalize_fill(f, deps))
            .collect::<Result<Vec<_>, _>>()?;
        let lines = styles
            .line_styles
            .iter()
            .map(|l| style::normalize_line(l, deps))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer::new(fills, lines))
    }
}

impl MorphLayer {
    fn from_raw(
        start: &ShapeStyles,
        end: &ShapeStyles,
        deps: &mut BitmapDependencies,
    ) -> Result<Self, DecodeError> {
        if start.fill_styles.len() != end.fill_styles.len() {
            return Err(DecodeError::MalformedInput {
                index: end.fill_styles.len() as u32,
                len: start.fill_styles.len(),
            });
        }
        if start.line_styles.len() != end.line_styles.len() {
            return Err(DecodeError::MalformedInput {
                index: end.line_styles.len() as u32,
                len: start.line_styles.len(),
            });
        }
        let fills = start
            .fill_styles
            .iter()
            .zip(&end.fill_styles)
            .map(|(s, e)| style::normalize_fill_pair(s, e, deps))
            .collect::<Result<Vec<_>, _>>()?;
        let lines = start
            .line_styles
            .iter()
            .zip(&end.line_styles)
            .map(|(s, e)| style::normalize_line_pair(s, e, deps))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer::new(fills, lines))
    }
}

/// Walks one flat edge-record stream, producing the closed layers (in
/// order) and the lazily-created default path, if any (§4.2).
pub(crate) fn emit_flat(
    initial_styles: &ShapeStyles,
    records: &[ShapeRecord],
    deps: &mut BitmapDependencies,
) -> Result<(Vec<FlatLayer>, Option<Vec<FlatSegment>>), DecodeError> {
    let mut layer = FlatLayer::from_raw(initial_styles, deps)?;
    let mut layers = Vec::new();
    let mut pen = Point::ZERO;
    let (mut left, mut right, mut line) = (0u32, 0u32, 0u32);
    let mut default_path: Option<Vec<FlatSegment>> = None;

    for record in records {
        match record {
            ShapeRecord::StyleChange(change) => {
                if let Some(new_styles) = &change.new_styles {
                    let next = FlatLayer::from_raw(new_styles, deps)?;
                    let closed = std::mem::replace(&mut layer, next);
                    log::debug!(
                        "closing style layer with {} fill(s), {} line(s)",
                        closed.fills.len(),
                        closed.lines.len()
                    );
                    layers.push(closed);
                    left = 0;
                    right = 0;
                    line = 0;
                }
                if let Some(f0) = change.fill_style_0 {
                    left = f0;
                }
                if let Some(f1) = change.fill_style_1 {
                    right = f1;
                }
                if let Some(l) = change.line_style {
                    line = l;
                }
                if let Some(move_to) = change.move_to {
                    pen = move_to;
                }
            }
            ShapeRecord::Edge(edge) => {
                let seg = resolve_edge(pen, edge);
                pen = seg.end;
                if left == 0 && right == 0 && line == 0 {
                    default_path.get_or_insert_with(Vec::new).push(seg);
                } else {
                    layer.push_active(left, right, line, seg)?;
                }
            }
        }
    }
    layers.push(layer);
    Ok((layers, default_path))
}

/// Walks the paired start/end edge-record streams of a morph shape in
/// lockstep (§4.2, §4.4), applying the back-up-cursor and
/// reuse-start-as-end rules when the two streams desync.
pub(crate) fn emit_morph(
    start_styles: &ShapeStyles,
    end_styles: &ShapeStyles,
    start_records: &[ShapeRecord],
    end_records: &[ShapeRecord],
    deps: &mut BitmapDependencies,
) -> Result<(Vec<MorphLayer>, Option<Vec<MorphSegment>>), DecodeError> {
    let mut layer = MorphLayer::from_raw(start_styles, end_styles, deps)?;
    let mut layers = Vec::new();
    let mut start_pen = Point::ZERO;
    let mut end_pen = Point::ZERO;
    let (mut left, mut right, mut line) = (0u32, 0u32, 0u32);
    let mut default_path: Option<Vec<MorphSegment>> = None;
    let mut end_idx = 0usize;

    for record in start_records {
        match record {
            ShapeRecord::StyleChange(change) => {
                // Peek the end stream once per start-side style change;
                // consume it only if it's also a style change, else back
                // up (leave the cursor where it is) per §4.2.
                let end_change = match end_records.get(end_idx) {
                    Some(ShapeRecord::StyleChange(end_change)) => {
                        end_idx += 1;
                        Some(end_change.clone())
                    }
                    _ => None,
                };

                if let Some(new_start_styles) = &change.new_styles {
                    let new_end_styles = end_change
                        .as_ref()
                        .and_then(|ec| ec.new_styles.clone())
                        .unwrap_or_else(|| new_start_styles.clone());
                    let next = MorphLayer::from_raw(new_start_styles, &new_end_styles, deps)?;
                    layers.push(std::mem::replace(&mut layer, next));
                    left = 0;
                    right = 0;
                    line = 0;
                }
                if let Some(f0) = change.fill_style_0 {
                    left = f0;
                }
                if let Some(f1) = change.fill_style_1 {
                    right = f1;
                }
                if let Some(l) = change.line_style {
                    line = l;
                }
                if let Some(move_to) = change.move_to {
                    start_pen = move_to;
                    if let Some(end_move) = end_change.as_ref().and_then(|ec| ec.move_to) {
                        end_pen = end_move;
                    }
                }
            }
            ShapeRecord::Edge(edge) => {
                let start_edge = resolve_edge(start_pen, edge);
                start_pen = start_edge.end;

                let end_source = match end_records.get(end_idx) {
                    Some(ShapeRecord::Edge(end_edge)) => {
                        end_idx += 1;
                        *end_edge
                    }
                    // End stream exhausted, or desynced onto a stray
                    // style change: reuse the start record as its own
                    // end (§4.2's "reuse start as end" rule).
                    _ => *edge,
                };
                let end_edge = resolve_edge(end_pen, &end_source);
                end_pen = end_edge.end;

                let (start_edge, end_edge) = promote_degenerate_pair(start_edge, end_edge);
                let seg = MorphSegment {
                    start0: start_edge.start,
                    end0: start_edge.end,
                    control0: start_edge.control,
                    start1: end_edge.start,
                    end1: end_edge.end,
                    control1: end_edge.control,
                };

                if left == 0 && right == 0 && line == 0 {
                    default_path.get_or_insert_with(Vec::new).push(seg);
                } else {
                    layer.push_active(left, right, line, seg)?;
                }
            }
        }
    }
    layers.push(layer);
    Ok((layers, default_path))
}
