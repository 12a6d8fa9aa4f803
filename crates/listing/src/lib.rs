//! Release listing: the generation-token state machine, its async driver
//! and the address-parameter mapping.

pub mod controller;
pub mod params;
pub mod service;

pub use controller::{
    Completion, FetchTicket, Generation, ListingController, ListingEntry, ListingQuery,
    ListingSettings, ListingState, FETCH_FAILED_MESSAGE,
};
pub use params::{AddressSelection, MemoryParams, ParamStore};
pub use service::{ListingCommand, ListingError, ListingHandle, ListingService, ListingSnapshot};
