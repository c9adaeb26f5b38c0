pub mod availability;
pub mod booking;
pub mod dashboard;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use dashboard::DashboardService;
