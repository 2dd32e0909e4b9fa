pub mod client;
pub mod controller;
pub mod error;
pub mod geolocation;

pub use client::{NearbyQuery, StoreClient, DEFAULT_LIMIT, DEFAULT_MAX_RADIUS_KM};
pub use controller::{Applied, PendingQuery, SearchController, SearchFailure, Trigger};
pub use error::ClientError;
pub use geolocation::{acquire_position, FixedPosition, GeolocationProvider, HttpGeolocator};
