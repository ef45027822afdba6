pub mod sportsdata;

// Re-export commonly used types
pub use sportsdata::SportsDataClient;
