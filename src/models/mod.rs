//! Core data models for the address hierarchy.

pub mod city;
pub mod object;
pub mod region;
pub mod street;

pub use city::{City, CityType};
pub use object::{GeoPoint, MapObject, Named};
pub use region::Region;
pub use street::{Building, Street};
