use crate::{
    error::{ClipError, Result},
    traits::HullBuilder,
    types::Point,
};

/// Signed turn of `r` relative to the directed line `p -> q`.
///
/// Negative when `r` lies further counter-clockwise (on screen, y down) than
/// `q` as seen from `p`; zero when the three points are collinear. Evaluated
/// in f64 so pixel-sized coordinates stay exact.
pub fn orientation(p: Point, q: Point, r: Point) -> f64 {
    let (px, py) = (f64::from(p.x), f64::from(p.y));
    let (qx, qy) = (f64::from(q.x), f64::from(q.y));
    let (rx, ry) = (f64::from(r.x), f64::from(r.y));
    (qy - py) * (rx - qx) - (qx - px) * (ry - qy)
}

fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    dx * dx + dy * dy
}

/// Index of the hull's starting point: smallest x, then smallest y, then
/// first occurrence.
fn anchor_index(points: &[Point]) -> usize {
    let mut anchor = 0;
    for (i, point) in points.iter().enumerate().skip(1) {
        let best = points[anchor];
        if point.x < best.x || (point.x == best.x && point.y < best.y) {
            anchor = i;
        }
    }
    anchor
}

/// Gift-wrapping (Jarvis march) convex hull.
///
/// Runs in O(n·h). Only strictly extreme points become vertices: of several
/// collinear candidates the farthest one wins, and copies of the current
/// point are never candidates. The legacy tool kept whichever collinear
/// candidate came later in the input; taking the farthest gives the same
/// polygon for every input order. Vertices are returned without repeating the
/// first one.
///
/// Points that all lie on one line wrap to their two extremes, so a
/// one-pixel-wide strip yields a two-vertex clip path along its axis.
#[derive(Debug, Clone, Default)]
pub struct GiftWrapHull;

impl HullBuilder for GiftWrapHull {
    fn build_hull(&self, points: &[Point]) -> Result<Vec<Point>> {
        if points.len() < 3 {
            return Err(ClipError::InvalidInput { region: 0, points: points.len() });
        }

        let anchor = points[anchor_index(points)];
        let mut hull = vec![anchor];
        let mut current = anchor;

        loop {
            let mut candidate: Option<Point> = None;
            for &point in points {
                if point == current {
                    continue;
                }
                let Some(best) = candidate else {
                    candidate = Some(point);
                    continue;
                };
                let turn = orientation(current, best, point);
                if turn < 0.0
                    || (turn == 0.0 && distance_sq(current, point) > distance_sq(current, best))
                {
                    candidate = Some(point);
                }
            }

            // Every point coincides with the anchor.
            let Some(next) = candidate else { break };
            if next == anchor {
                break;
            }
            if hull.len() >= points.len() {
                return Err(ClipError::GeometricComputation(format!(
                    "gift wrapping did not close after {} vertices",
                    hull.len()
                )));
            }
            hull.push(next);
            current = next;
        }

        if hull.len() < 2 {
            return Err(ClipError::DegenerateHull { region: 0, vertices: hull.len() });
        }
        Ok(hull)
    }
}
