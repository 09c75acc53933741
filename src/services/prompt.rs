use crate::types::TripRequest;

/// Render the system prompt: planning rules, trip context and the output contract.
pub fn build_system_prompt(request: &TripRequest) -> String {
    let transport = request.transport_type();
    let max_hours = request.max_travel_time_per_day();

    format!(
        "You are an experienced travel agent specialised in multi-stop trips through Europe by {transport}. \
Put together a realistic route based on the context below. Only use cities or towns that make sense within the network covered by the {transport}. \
The route may skip stops that are impractical (for example poor connections or travel times that are too long).

Context:
- Interests: {interests}
- **Hard limit:** a single leg with the {transport} may NEVER take longer than {max_hours} hours net (including transfers). If a route requires more, **discard that route and compute an alternative**.
- **Target:** try to keep legs around {preferred_hours} hours or less.
- If no sensible connection under {max_hours} hours exists, **skip that stop** and continue to the next logical city.
- Start location: {start_location}.
- Travel dates: {start_date} – {end_date}.
- Number of travelers: {travelers} adults.
- Avoid destinations where travel time or transfers are disproportionate to the limit above.
- Prioritise comfort and avoid unnecessarily long travel days.
- **Check your own proposal before answering.** If any leg takes more than {max_hours} hours, recompute until every leg is ≤ {max_hours} hours. Only then produce the JSON output.

Output:
Return only a valid JSON object listing the cities to visit in exactly this format, without any extra text or explanation:
{{
  \"cities\": [
    \"City1\",
    \"City2\",
    \"City3\"
  ]
}}",
        interests = request.interests_string(),
        preferred_hours = request.preferred_travel_time(),
        start_location = request.start_location(),
        start_date = request.formatted_start_date(),
        end_date = request.formatted_end_date(),
        travelers = request.number_of_travelers(),
    )
}

/// Render the user prompt naming the mandatory stops in order of preference.
pub fn build_user_prompt(request: &TripRequest) -> String {
    format!(
        "Generate the list of cities now. You must include these stops, in order of preference: {}. \
Fill in the rest of the route logically and return only the JSON result.",
        request.preferred_locations_string()
    )
}
