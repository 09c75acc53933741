use tracing::{debug, error, info};

use crate::{
    config::PlannerConfig,
    error::Result,
    services::{
        interpreter::interpret_completion,
        openai_client::{ChatCompletionRequest, OpenAIClient},
    },
    types::{ItineraryResult, TripRequest, TripRequestPayload},
};

/// Runs the itinerary pipeline: validate, dispatch, interpret.
///
/// Holds only configuration and a reusable HTTP client, so one instance can be
/// shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct TravelPlanner {
    openai_client: OpenAIClient,
    model: String,
    temperature: f32,
}

impl TravelPlanner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        Ok(Self {
            openai_client: OpenAIClient::new(&config)?,
            model: config.model,
            temperature: config.temperature,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PlannerConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Validate raw parameters and generate an itinerary.
    pub async fn generate_from_payload(
        &self,
        payload: TripRequestPayload,
    ) -> Result<ItineraryResult> {
        debug!(target: "travel_planner::pipeline", "validating trip request");
        let request = TripRequest::from_payload(payload)?;
        self.generate(&request).await
    }

    /// Validate raw JSON bytes and generate an itinerary.
    pub async fn generate_from_json(&self, body: &[u8]) -> Result<ItineraryResult> {
        debug!(target: "travel_planner::pipeline", "validating trip request");
        let request = TripRequest::from_json(body)?;
        self.generate(&request).await
    }

    /// Generate an itinerary for an already validated request.
    pub async fn generate(&self, request: &TripRequest) -> Result<ItineraryResult> {
        let call = ChatCompletionRequest::for_trip(request, &self.model, self.temperature);

        debug!(
            target: "travel_planner::pipeline",
            model = %self.model,
            locations = %request.preferred_locations_string(),
            "dispatching chat completion"
        );
        let envelope = self
            .openai_client
            .chat_completion(call)
            .await
            .map_err(|err| {
                error!(
                    target: "travel_planner::pipeline",
                    error = %err,
                    request = ?request,
                    "travel plan generation failed"
                );
                err
            })?;

        debug!(target: "travel_planner::pipeline", "interpreting completion");
        let result = interpret_completion(envelope).map_err(|err| {
            error!(
                target: "travel_planner::pipeline",
                error = %err.message,
                request = ?request,
                "travel plan generation failed"
            );
            err
        })?;

        info!(
            target: "travel_planner::pipeline",
            cities = result.cities.len(),
            total_tokens = result.usage.map(|usage| usage.total_tokens),
            "travel plan generated"
        );
        Ok(result)
    }
}
