pub mod planner;

pub use planner::TravelPlanner;
