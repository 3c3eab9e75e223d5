//! Path queries over a built network
//!
//! - [`fastest_path`]: least generalized cost road path with turn restrictions
//! - [`resolve_transit_trip`]: precomputed transit itinerary with resolved legs

mod fastest_path;
mod heap;
mod transit;

pub use fastest_path::{RoadPath, fastest_path};
pub use heap::{HeapEntry, IndexedMinHeap};
pub use transit::{TransitLeg, TransitTrip, resolve_transit_trip};
