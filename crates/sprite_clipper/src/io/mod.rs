pub mod geojson;
pub mod json;
pub mod sheet;
