//! Intersection ledger: every (t, object) pair a ray produced, kept sorted.

use std::ops::Index;

use prism_math::EPSILON;

use crate::{NodeId, SceneError, SceneResult};

/// A single ray/surface crossing.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Ray parameter of the crossing
    pub t: f32,
    /// Scene-graph node that was crossed
    pub object: NodeId,
}

impl Intersection {
    pub fn new(t: f32, object: NodeId) -> Self {
        Self { t, object }
    }
}

/// Two intersections are equal when their `t` values agree within EPSILON.
///
/// This is only used to locate a hit inside a ledger, never to deduplicate.
impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        (self.t - other.t).abs() < EPSILON
    }
}

/// Ordered collection of intersections with a cached hit index.
///
/// Entries are sorted ascending by `t` after every mutation. The hit is the
/// first entry with `t > 0`.
#[derive(Debug, Clone, Default)]
pub struct Intersections {
    entries: Vec<Intersection>,
    hit: Option<usize>,
}

impl Intersections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from unsorted entries.
    pub fn from_vec(entries: Vec<Intersection>) -> Self {
        let mut ledger = Self { entries, hit: None };
        ledger.reindex();
        ledger
    }

    pub fn push(&mut self, intersection: Intersection) {
        self.entries.push(intersection);
        self.reindex();
    }

    /// Merge another ledger into this one and re-sort across both.
    pub fn append(&mut self, mut other: Intersections) {
        self.entries.append(&mut other.entries);
        self.reindex();
    }

    // Stable sort: entries with equal t keep their insertion order.
    fn reindex(&mut self) {
        self.entries.sort_by(|a, b| a.t.total_cmp(&b.t));
        self.hit = self.entries.iter().position(|i| i.t > 0.0);
    }

    /// The visible intersection, if any.
    pub fn hit(&self) -> Option<&Intersection> {
        self.hit.map(|index| &self.entries[index])
    }

    pub fn hit_index(&self) -> Option<usize> {
        self.hit
    }

    /// Checked access.
    pub fn get(&self, index: usize) -> SceneResult<&Intersection> {
        self.entries.get(index).ok_or(SceneError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Intersection] {
        &self.entries
    }
}

impl Index<usize> for Intersections {
    type Output = Intersection;

    fn index(&self, index: usize) -> &Intersection {
        match self.entries.get(index) {
            Some(entry) => entry,
            None => panic!(
                "intersection index {} out of bounds (len {})",
                index,
                self.entries.len()
            ),
        }
    }
}

impl FromIterator<Intersection> for Intersections {
    fn from_iter<I: IntoIterator<Item = Intersection>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = std::slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
