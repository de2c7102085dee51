//! Contour reconstructor (§4.3): joins an unordered segment bucket into
//! closed/open contours via endpoint matching, without sorting.
//!
//! Grounded on `swf_runtime/shape_utils.rs`'s `ShapeConverter`/`ActivePath`
//! chain-walking, generalized into one graph-walk function shared by flat
//! and morph buckets through the `EdgeSegment` trait — the flat and morph
//! reconstruction loops in the teacher are otherwise near-identical.

use std::collections::HashMap;

use fnv::FnvBuildHasher;

use crate::twips::Point;

/// One bucket entry: a straight or curved edge with an orientation that
/// can be flipped in place while the walk reassembles contours.
///
/// `start`/`end` drive the graph (exact integer equality, §3); for morph
/// segments these are the start-frame points (§4.4).
pub(crate) trait EdgeSegment {
    type Command: Copy;

    fn start(&self) -> Point;
    fn end(&self) -> Point;

    /// Swaps this segment's direction so its old `end()` becomes the new
    /// `start()`. Curve control points stay put; only traversal order and
    /// which point is "first" changes.
    fn flip(&mut self);

    /// The command that opens a contour at this segment's `start()`.
    fn move_to(&self) -> Self::Command;

    /// The command that draws from `start()` to `end()`.
    fn draw_to(&self) -> Self::Command;
}

struct Node<T> {
    seg: T,
    prev: Option<usize>,
    next: Option<usize>,
    visited: bool,
}

fn link<T>(nodes: &mut [Node<T>], a: usize, b: usize) {
    if nodes[a].prev.is_none() {
        nodes[a].prev = Some(b);
    } else {
        nodes[a].next = Some(b);
    }
    if nodes[b].prev.is_none() {
        nodes[b].prev = Some(a);
    } else {
        nodes[b].next = Some(a);
    }
}

/// The neighbour of `at` other than `came_from` (undirected walk). On the
/// first hop (`came_from = None`) this follows `prev` first, matching the
/// spec's "follow its prev chain" framing.
fn step<T>(nodes: &[Node<T>], at: usize, came_from: Option<usize>) -> Option<usize> {
    let node = &nodes[at];
    match came_from {
        None => node.prev.or(node.next),
        Some(from) => {
            if node.prev == Some(from) {
                node.next
            } else {
                node.prev
            }
        }
    }
}

fn emit_chain<T: EdgeSegment>(
    nodes: &mut [Node<T>],
    start: usize,
    flip_start: bool,
    out: &mut Vec<T::Command>,
) {
    if flip_start {
        nodes[start].seg.flip();
    }
    out.push(nodes[start].seg.move_to());
    out.push(nodes[start].seg.draw_to());
    nodes[start].visited = true;

    let mut current = start;
    let mut came_from: Option<usize> = None;

    loop {
        let Some(next) = step(nodes, current, came_from) else {
            break;
        };
        if nodes[next].visited {
            // Closed back onto the contour's own start: the ring is complete.
            break;
        }

        let arrival = nodes[current].seg.end();
        if nodes[next].seg.start() != arrival {
            nodes[next].seg.flip();
        }
        out.push(nodes[next].seg.draw_to());
        nodes[next].visited = true;

        came_from = Some(current);
        current = next;
    }
}

/// Joins an unordered segment bucket into one command sequence (§4.3):
/// possibly several contours, each opened by its own `move_to`.
pub(crate) fn reconstruct<T: EdgeSegment>(segments: Vec<T>) -> Vec<T::Command> {
    let mut nodes: Vec<Node<T>> = segments
        .into_iter()
        .map(|seg| Node {
            seg,
            prev: None,
            next: None,
            visited: false,
        })
        .collect();

    let mut endpoint_match: HashMap<Point, usize, FnvBuildHasher> = Default::default();
    for i in 0..nodes.len() {
        for point in [nodes[i].seg.start(), nodes[i].seg.end()] {
            match endpoint_match.remove(&point) {
                None => {
                    endpoint_match.insert(point, i);
                }
                Some(q) => link(&mut nodes, q, i),
            }
        }
    }

    let mut out = Vec::new();

    // Open contours: a segment whose own start or end is still an
    // unconsumed map entry owns a genuinely free endpoint. Walking in
    // emission order (rather than map iteration order) keeps output
    // ordering tied to input order whenever a bucket has no ambiguity.
    //
    // A chain must always be emitted head-first from its free `start()`,
    // so this scans ALL nodes for a free start before considering any
    // free end — otherwise a node with a free end but a non-free start
    // (reached first in index order) would emit flipped, making output
    // direction depend on bucket scan order rather than topology.
    for i in 0..nodes.len() {
        if !nodes[i].visited && endpoint_match.contains_key(&nodes[i].seg.start()) {
            emit_chain(&mut nodes, i, false, &mut out);
        }
    }
    for i in 0..nodes.len() {
        if !nodes[i].visited && endpoint_match.contains_key(&nodes[i].seg.end()) {
            emit_chain(&mut nodes, i, true, &mut out);
        }
    }

    // Whatever's left is part of a fully closed loop with no free end;
    // any member segment is a valid place to start (§4.3 step 3).
    for i in 0..nodes.len() {
        if !nodes[i].visited {
            emit_chain(&mut nodes, i, false, &mut out);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Command;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct TestSegment {
        start: Point,
        end: Point,
        control: Option<Point>,
    }

    impl TestSegment {
        fn straight(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
            Self {
                start: Point::from_twips(x0, y0),
                end: Point::from_twips(x1, y1),
                control: None,
            }
        }
    }

    impl EdgeSegment for TestSegment {
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

    fn p(x: i32, y: i32) -> Point {
        Point::from_twips(x, y)
    }

    #[test]
    fn reassembles_out_of_order_square() {
        let segments = vec![
            TestSegment::straight(100, 0, 100, 100), // right
            TestSegment::straight(100, 100, 0, 100), // bottom
            TestSegment::straight(0, 100, 0, 0),     // left
            TestSegment::straight(0, 0, 100, 0),     // top
        ];
        let commands = reconstruct(segments);
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], Command::MoveTo(p(100, 0)));
        let points: Vec<Point> = commands.iter().map(Command::end_point).collect();
        assert_eq!(points.last(), Some(&p(100, 0)));
    }

    #[test]
    fn open_chain_starts_at_the_free_endpoint() {
        let segments = vec![
            TestSegment::straight(50, 50, 100, 0),
            TestSegment::straight(0, 0, 50, 50),
        ];
        let commands = reconstruct(segments);
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(p(0, 0)),
                Command::LineTo(p(50, 50)),
                Command::LineTo(p(100, 0)),
            ]
        );
    }

    #[test]
    fn disjoint_contours_each_emit_their_own_move_to() {
        let segments = vec![
            TestSegment::straight(0, 0, 10, 0),
            TestSegment::straight(500, 500, 510, 500),
        ];
        let commands = reconstruct(segments);
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(p(0, 0)),
                Command::LineTo(p(10, 0)),
                Command::MoveTo(p(500, 500)),
                Command::LineTo(p(510, 500)),
            ]
        );
    }

    #[test]
    fn single_segment_with_coincident_endpoints_is_a_trivial_loop() {
        let segments = vec![TestSegment {
            start: p(5, 5),
            end: p(5, 5),
            control: Some(p(10, 0)),
        }];
        let commands = reconstruct(segments);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], Command::MoveTo(p(5, 5)));
    }
}
