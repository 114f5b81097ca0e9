//! # The Token Field
//!
//! An ordered sequence of sectors. Sectors are addressed purely by index;
//! indices stay stable for the lifetime of a layer.
//!
//! Transforms never mutate a field in place. They read the old field and
//! build a new one through [`Field::map_angles`], so a refused operation
//! can always hand back the original untouched.

use serde::{Deserialize, Serialize};

use crate::angle::similarity;
use crate::sector::Sector;
use crate::{Error, Result};

/// Ordered collection of sectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field {
    sectors: Vec<Sector>,
}

impl Field {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sector> {
        self.sectors.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Sector> {
        self.sectors.get(index)
    }

    /// Fetch a sector or report the index as out of range.
    pub fn sector(&self, index: usize) -> Result<&Sector> {
        self.sectors.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.sectors.len(),
        })
    }

    /// Ensure `index` addresses a sector.
    pub fn check_index(&self, index: usize) -> Result<()> {
        self.sector(index).map(|_| ())
    }

    /// Normalized angle of every sector, in field order.
    pub fn angles(&self) -> Vec<f64> {
        self.sectors.iter().map(Sector::angle).collect()
    }

    /// Indices of anchor sectors, ascending.
    pub fn anchor_indices(&self) -> Vec<usize> {
        self.sectors
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_anchor)
            .map(|(i, _)| i)
            .collect()
    }

    /// Flag or unflag a sector as a cluster centre.
    pub fn set_anchor(&mut self, index: usize, anchor: bool) -> Result<()> {
        let len = self.sectors.len();
        let sector = self
            .sectors
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        sector.is_anchor = anchor;
        Ok(())
    }

    /// Re-flag every sector: `i` becomes an anchor iff `f(i)`.
    pub fn reanchor<F>(&mut self, mut f: F)
    where
        F: FnMut(usize) -> bool,
    {
        for (i, sector) in self.sectors.iter_mut().enumerate() {
            sector.is_anchor = f(i);
        }
    }

    /// Raw cosine between two sectors (may be negative).
    pub fn similarity(&self, a: usize, b: usize) -> Result<f64> {
        let a = self.sector(a)?.angle();
        let b = self.sector(b)?.angle();
        Ok(similarity(a, b))
    }

    /// Build a new field with every angle recomputed by `f(index, sector)`.
    ///
    /// Rings, labels, colours and anchor flags are carried over. The new
    /// angles are normalized on the way in.
    pub fn map_angles<F>(&self, mut f: F) -> Field
    where
        F: FnMut(usize, &Sector) -> f64,
    {
        let sectors = self
            .sectors
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut next = s.clone();
                next.set_angle(f(i, s));
                next
            })
            .collect();
        Field { sectors }
    }
}

impl From<Vec<Sector>> for Field {
    fn from(sectors: Vec<Sector>) -> Self {
        Self::new(sectors)
    }
}

impl<'a> IntoIterator for &'a Field {
    type Item = &'a Sector;
    type IntoIter = std::slice::Iter<'a, Sector>;

    fn into_iter(self) -> Self::IntoIter {
        self.sectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::Ring;
    use std::f64::consts::PI;

    fn sample() -> Field {
        Field::new(vec![
            Sector::new(0.0, Ring::Outer),
            Sector::new(PI / 2.0, Ring::Inner).anchored(),
            Sector::new(PI, Ring::Outer),
        ])
    }

    #[test]
    fn test_anchor_indices() {
        let mut field = sample();
        assert_eq!(field.anchor_indices(), vec![1]);
        field.set_anchor(2, true).unwrap();
        assert_eq!(field.anchor_indices(), vec![1, 2]);
        field.set_anchor(1, false).unwrap();
        assert_eq!(field.anchor_indices(), vec![2]);
    }

    #[test]
    fn test_set_anchor_out_of_range() {
        let mut field = sample();
        let err = field.set_anchor(7, true).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 7, len: 3 }));
    }

    #[test]
    fn test_similarity_raw_cosine() {
        let field = sample();
        assert!(field.similarity(0, 1).unwrap().abs() < 1e-12);
        assert!((field.similarity(0, 2).unwrap() + 1.0).abs() < 1e-12);
        assert!(field.similarity(0, 9).is_err());
    }

    #[test]
    fn test_map_angles_keeps_metadata_and_wraps() {
        let field = sample();
        let moved = field.map_angles(|_, s| s.angle() + 2.0 * PI + 0.1);
        assert_eq!(moved.len(), 3);
        assert!(moved.get(1).unwrap().is_anchor);
        assert_eq!(moved.get(1).unwrap().ring, Ring::Inner);
        for s in &moved {
            assert!(s.angle() > -PI && s.angle() <= PI);
        }
        // original untouched
        assert_eq!(field, sample());
    }

    #[test]
    fn test_empty_field() {
        let field = Field::default();
        assert!(field.is_empty());
        assert!(field.anchor_indices().is_empty());
        assert!(field.map_angles(|_, s| s.angle()).is_empty());
    }
}
