pub mod itinerary;
pub mod trip;

pub use itinerary::{ItineraryResult, TokenUsage};
pub use trip::{TripRequest, TripRequestBuilder, TripRequestPayload};
