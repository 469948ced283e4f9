//! HTTP routes for pixelsmith

pub mod home;
pub mod upload;

use actix_web::web;

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    home::configure(cfg);
    upload::configure(cfg);
}
