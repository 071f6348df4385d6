//! `PlaceStore`: the per-domain place arena.

use cg_core::PlaceId;

use crate::{Place, PlaceCategory, PlaceError, PlaceResult, PlaceSettings};

/// Every place of one domain, indexed by `PlaceId`.
///
/// Places are created once during setup and never removed, so a `PlaceId`
/// stays valid for the whole run.
#[derive(Debug, Default)]
pub struct PlaceStore {
    places: Vec<Place>,
}

impl PlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        PlaceStore { places: Vec::with_capacity(n) }
    }

    /// Append a clean place and return its handle.
    pub fn add(&mut self, category: PlaceCategory, settings: PlaceSettings) -> PlaceResult<PlaceId> {
        let id = PlaceId::try_from(self.places.len()).map_err(|_| PlaceError::Capacity("places"))?;
        if !id.is_valid() {
            return Err(PlaceError::Capacity("places"));
        }
        self.places.push(Place::new(id, category, settings));
        Ok(id)
    }

    /// Append `n` places of one category; returns their handles in order.
    pub fn add_many(
        &mut self,
        n: usize,
        category: PlaceCategory,
        settings: PlaceSettings,
    ) -> PlaceResult<Vec<PlaceId>> {
        self.places.reserve(n);
        (0..n).map(|_| self.add(category, settings)).collect()
    }

    #[inline]
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.index())
    }

    pub fn try_get(&self, id: PlaceId) -> PlaceResult<&Place> {
        self.get(id).ok_or(PlaceError::PlaceNotFound(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Mutable slice for the parallel update phase.
    pub fn as_mut_slice(&mut self) -> &mut [Place] {
        &mut self.places
    }

    pub fn count_category(&self, category: PlaceCategory) -> usize {
        self.places.iter().filter(|p| p.category == category).count()
    }

    /// Sum of every place's contamination.
    pub fn total_contamination(&self) -> f64 {
        self.places.iter().map(Place::contamination).sum()
    }
}
