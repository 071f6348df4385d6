//! `cg-exchange`: moving agents between domains.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`record`]    | `ExchangeRecord`, `TravelTag`, schema constants, tag naming |
//! | [`channel`]   | `Channel` trait, `ChannelMesh` / `MeshEndpoint` (in-process)|
//! | [`protocol`]  | `Exchange` (the per-step protocol), `ExchangeReport`        |
//! | [`error`]     | `ExchangeError`, `ExchangeResult<T>`                        |
//!
//! # Per-step protocol (summary)
//!
//! ```text
//! ① map identity → index of every dormant local agent
//! ② local leavers:     deactivate, clear leaver, send tag 0 to the host domain
//! ③ leaving visitors:  deactivate, clear leaver, send tag 2 to the origin domain
//! ④ commit(step)
//! ⑤ fetch(step), then for every record addressed here:
//!      tag 0 → reuse an idle placeholder (or grow the pool) as a visitor
//!      tag 2 → reactivate the dormant local with that identity, return trip
//! ```
//!
//! At no point is one identity active on two domains: the sender deactivates
//! before committing and the receiver activates only after fetching.

pub mod channel;
pub mod error;
pub mod protocol;
pub mod record;


pub use channel::{Channel, ChannelMesh, MeshEndpoint};
pub use error::{ExchangeError, ExchangeResult};
pub use protocol::{Exchange, ExchangeReport};
pub use record::{ExchangeRecord, RECORD_FIELDS, SCHEMA_VERSION, TravelTag, record_tag};
