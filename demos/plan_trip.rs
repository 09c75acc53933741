use chrono::NaiveDate;
use travel_planner::{PlannerConfig, TravelPlanner, TripRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::try_init().ok();

    let planner = TravelPlanner::new(PlannerConfig::from_env()?)?;

    let request = TripRequest::builder(
        NaiveDate::from_ymd_opt(2025, 5, 10).ok_or("invalid start date")?,
        NaiveDate::from_ymd_opt(2025, 5, 20).ok_or("invalid end date")?,
        vec!["Paris".into(), "Zurich".into(), "Milan".into()],
        vec![
            "experiencing European culture".into(),
            "tasting local cuisine".into(),
            "impressive landscapes".into(),
            "historic sights".into(),
            "hiking and other outdoor activities".into(),
        ],
    )
    .with_number_of_travelers(4)
    .with_max_travel_time_per_day(6)
    .build()?;

    println!("=== Travel Planner ===\n");
    println!(
        "{} – {}, from {} by {}",
        request.formatted_start_date(),
        request.formatted_end_date(),
        request.start_location(),
        request.transport_type()
    );
    println!("Must visit: {}\n", request.preferred_locations_string());

    let itinerary = planner.generate(&request).await?;
    println!("{}", itinerary.summary());

    println!(
        "\nStructured JSON:\n{}",
        serde_json::to_string_pretty(&itinerary)?
    );

    Ok(())
}
