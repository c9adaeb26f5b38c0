pub mod admin_repo;
pub mod availability_repo;
pub mod booking_repo;
pub mod car_repo;
pub mod errors;

pub use admin_repo::AdminRepository;
pub use availability_repo::AvailabilityRepository;
pub use booking_repo::{BookingRepository, ReportFilter};
pub use car_repo::CarRepository;
pub use errors::is_unique_violation;
