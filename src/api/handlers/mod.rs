//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod cars;
pub mod health;
pub mod root;

pub use auth::whoami_handler;
pub use cars::{
    create_car_handler, delete_car_handler, finish_rental_handler, get_car_handler,
    list_cars_handler, rent_car_handler, update_car_handler,
};
pub use health::health_handler;
pub use root::{not_found_handler, root_handler};
