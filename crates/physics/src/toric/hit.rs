use std::cmp::Ordering;

use crate::*;

/// A collider found by a toric cast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ToricHit {
    /// Where on the collider the query touched it.
    pub point: V2,
    /// Where the query was when it touched: the hit point for rays, the swept
    /// circle's center for circle casts.
    pub centroid: V2,
    pub collider: ColliderHandle,
    /// Outward normal of the collider at `point`.  Rays starting inside a
    /// collider have none.
    pub normal: Option<V2>,
    /// Total distance walked from the origin, across every tile crossed.
    pub distance: f64,
}

fn by_distance(a: &ToricHit, b: &ToricHit) -> Ordering {
    a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
}

pub(crate) fn nearest(hits: Vec<ToricHit>) -> Option<ToricHit> {
    hits.into_iter().min_by(by_distance)
}

fn sorted(mut hits: Vec<ToricHit>) -> Vec<ToricHit> {
    hits.sort_by(by_distance);
    hits
}

/// Hits gathered leg by leg for the `_all` casts.
///
/// A collider straddling a seam shows up twice: hit in one leg, then already
/// touched at the start of the next.  The second sighting is dropped.
#[derive(Debug, Default)]
pub(crate) struct LegHits {
    hits: Vec<ToricHit>,
    last_leg: Vec<ColliderHandle>,
}

impl LegHits {
    pub(crate) fn add_leg(&mut self, leg: Vec<ToricHit>, reach: f64) {
        let colliders = leg.iter().map(|h| h.collider).collect();
        for hit in leg {
            let continued = hit.distance <= reach && self.last_leg.contains(&hit.collider);
            if !continued {
                self.hits.push(hit);
            }
        }
        self.last_leg = colliders;
    }

    pub(crate) fn into_sorted(self) -> Vec<ToricHit> {
        sorted(self.hits)
    }
}
