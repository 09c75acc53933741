//! travel-planner: itinerary generation backed by an OpenAI-compatible chat API
//!
//! Trip parameters are validated into a [`TripRequest`], rendered into a system
//! and user prompt, sent as a single chat completion call, and the model's JSON
//! reply is parsed into an [`ItineraryResult`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use travel_planner::{PlannerConfig, TravelPlanner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let planner = TravelPlanner::new(PlannerConfig::new(api_key))?;
//!
//!     let request = TripRequest::builder(
//!         NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
//!         vec!["Paris".into(), "Zurich".into(), "Milan".into()],
//!         vec!["culture".into()],
//!     )
//!     .build()?;
//!
//!     let itinerary = planner.generate(&request).await?;
//!     println!("{}", itinerary.summary());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod types;

pub use config::{PlannerConfig, ServerConfig};
pub use core::TravelPlanner;
pub use error::{
    FieldError, PlannerError, ResponseParseError, Result, UpstreamError, ValidationError,
};
pub use types::{ItineraryResult, TokenUsage, TripRequest, TripRequestBuilder, TripRequestPayload};

#[cfg(feature = "cli")]
pub mod cli;
