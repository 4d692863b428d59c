pub mod error;
pub mod matrix;
pub mod vec3;

pub use error::GeoError;
pub use vec3::Vec3;
