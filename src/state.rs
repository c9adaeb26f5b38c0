use std::path::PathBuf;

use sqlx::PgPool;

use crate::auth::TokenStore;
use crate::repository::{AdminRepository, AvailabilityRepository, CarRepository};
use crate::service::{AvailabilityService, BookingService, DashboardService};

#[derive(Clone)]
pub struct AppState {
    pub cars: CarRepository,
    pub admins: AdminRepository,
    pub availability: AvailabilityService,
    pub bookings: BookingService,
    pub dashboard: DashboardService,
    pub tokens: TokenStore,
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: PgPool, uploads_dir: PathBuf) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            availability: AvailabilityService::new(AvailabilityRepository::new(pool.clone())),
            bookings: BookingService::new(pool.clone()),
            dashboard: DashboardService::new(pool),
            tokens: TokenStore::new(),
            uploads_dir,
        }
    }
}
