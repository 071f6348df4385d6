//! `cg-place`: places, the place arena, and travel destinations.
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`place`]       | `Place`, `PlaceCategory`, `PlaceSettings`               |
//! | [`store`]       | `PlaceStore` arena indexed by `PlaceId`                 |
//! | [`destination`] | `TravelDestination`, `DestinationRegistry`              |
//! | [`error`]       | `PlaceError`, `PlaceResult<T>`                          |
//!
//! Contamination is the only state written concurrently by many agents in a
//! step, so `Place::add_contamination` takes `&self` and accumulates through
//! an atomic compare-and-swap.  Everything else about a place is mutated
//! through `&mut` in the place-update phase.

pub mod destination;
pub mod error;
pub mod place;
pub mod store;

#[cfg(test)]
mod tests;

pub use destination::{DestinationRegistry, TravelDestination};
pub use error::{PlaceError, PlaceResult};
pub use place::{Place, PlaceCategory, PlaceSettings};
pub use store::PlaceStore;
