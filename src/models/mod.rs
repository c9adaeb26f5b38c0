pub mod admin;
pub mod booking;
pub mod car;
pub mod unavailable_date;

pub use admin::Admin;
pub use booking::{
    Booking, BookingChanges, BookingWithCar, CreateBookingRequest, NewBooking,
    UpdateBookingRequest,
};
pub use car::{Car, CreateCarRequest, RemoveImageRequest, UpdateCarRequest};
pub use unavailable_date::{UnavailableDate, UnavailableDatesRequest};
