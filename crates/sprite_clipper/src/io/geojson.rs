use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Number, Value as JsonValue};
use crate::{error::Result, types::ComputedClipPaths};

fn number(value: f32) -> JsonValue {
    Number::from_f64(f64::from(value))
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl ComputedClipPaths {
    /// Export as a GeoJSON FeatureCollection in pixel coordinates.
    ///
    /// Each clip path becomes one Polygon feature whose ring repeats the
    /// first vertex at the end, as GeoJSON requires.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .clip_paths
            .iter()
            .enumerate()
            .map(|(i, clip)| {
                let mut ring: Vec<Vec<f64>> = clip
                    .clip_path
                    .iter()
                    .map(|p| vec![f64::from(p.x), f64::from(p.y)])
                    .collect();
                if let Some(first) = ring.first().cloned() {
                    ring.push(first);
                }

                let centroid = clip.centroid();
                let mut properties = Map::new();
                properties.insert("name".to_string(), JsonValue::String(clip.name.clone()));
                properties.insert("area".to_string(), number(clip.area()));
                properties.insert("perimeter".to_string(), number(clip.perimeter()));
                properties.insert(
                    "centroid".to_string(),
                    JsonValue::Array(vec![number(centroid.x), number(centroid.y)]),
                );
                properties.insert("vertex_count".to_string(), JsonValue::from(clip.clip_path.len()));

                let bbox = (!clip.clip_path.is_empty()).then(|| {
                    let (min, max) = clip.bounding_box();
                    [min[0], min[1], max[0], max[1]].map(f64::from).to_vec()
                });

                Feature {
                    bbox,
                    geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                    id: Some(geojson::feature::Id::Number(Number::from(i + 1))),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let mut foreign_members = Map::new();
        foreign_members.insert("image_width".to_string(), JsonValue::from(self.image_width));
        foreign_members.insert("image_height".to_string(), JsonValue::from(self.image_height));
        foreign_members.insert("clip_path_count".to_string(), JsonValue::from(self.clip_paths.len()));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    /// Export to GeoJSON and serialize to a pretty JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}
