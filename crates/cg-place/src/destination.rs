//! Named travel destinations.
//!
//! A destination is a vehicle that takes travellers there and a lodging
//! place where they stay.  Every domain creates the places of every
//! destination in the same order, so the handles agree across domains and a
//! returning traveller can ride home on its local copy of the vehicle.  A
//! destination is *remote* everywhere except on the domain that owns it.

use cg_core::{DestinationConfig, DestinationId, PlaceId};

use crate::{PlaceCategory, PlaceError, PlaceResult, PlaceSettings, PlaceStore};

#[derive(Clone, Debug, PartialEq)]
pub struct TravelDestination {
    pub id:      DestinationId,
    pub name:    String,
    pub vehicle: PlaceId,
    pub lodging: PlaceId,
    /// Domain hosting the destination.
    pub domain:  String,
    /// `true` unless this domain is `domain`.
    pub remote:  bool,
}

/// All destinations known to one domain.
#[derive(Clone, Debug, Default)]
pub struct DestinationRegistry {
    destinations: Vec<TravelDestination>,
}

impl DestinationRegistry {
    /// Create the vehicle and lodging of every configured destination.
    pub fn build(
        configs: &[DestinationConfig],
        local_domain: &str,
        places: &mut PlaceStore,
        settings: PlaceSettings,
    ) -> PlaceResult<Self> {
        let mut destinations = Vec::with_capacity(configs.len());
        for (i, cfg) in configs.iter().enumerate() {
            let id = DestinationId::try_from(i).map_err(|_| PlaceError::Capacity("destinations"))?;
            let vehicle = places.add(PlaceCategory::Vehicle, settings)?;
            let lodging = places.add(PlaceCategory::Lodging, settings)?;
            destinations.push(TravelDestination {
                id,
                name: cfg.name.clone(),
                vehicle,
                lodging,
                domain: cfg.domain.clone(),
                remote: cfg.domain != local_domain,
            });
        }
        Ok(DestinationRegistry { destinations })
    }

    #[inline]
    pub fn get(&self, id: DestinationId) -> Option<&TravelDestination> {
        self.destinations.get(id.index())
    }

    pub fn try_get(&self, id: DestinationId) -> PlaceResult<&TravelDestination> {
        self.get(id).ok_or(PlaceError::DestinationNotFound(id))
    }

    pub fn find(&self, name: &str) -> PlaceResult<&TravelDestination> {
        self.destinations
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| PlaceError::UnknownDestination(name.to_string()))
    }

    /// The first destination this domain hosts; visitors stay there.  A
    /// distributed config never lets a domain host more than one.
    pub fn hosted(&self) -> Option<&TravelDestination> {
        self.destinations.iter().find(|d| !d.remote)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TravelDestination> {
        self.destinations.iter()
    }
}
