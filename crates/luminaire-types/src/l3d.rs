use serde::{Deserialize, Serialize};

/// Parsed structure of an L3D luminaire geometry bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct L3dScene {
    pub geometry_definitions: Vec<GeometryDefinition>,
    pub parts: Vec<Part>,
    /// Articulation definitions. Carried through to the scene graph untouched.
    pub joints: Vec<Joint>,
}

impl L3dScene {
    /// Look up a geometry definition by id. The first definition wins on duplicates.
    pub fn geometry(&self, id: &str) -> Option<&GeometryDefinition> {
        self.geometry_definitions.iter().find(|g| g.id == id)
    }

    pub fn light_emitting_object_count(&self) -> usize {
        self.parts.iter().map(|p| p.light_emitting_objects.len()).sum()
    }
}

/// A mesh file referenced by one or more parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryDefinition {
    pub id: String,
    /// Asset path inside the bundle, e.g. `geom_1/body.obj`.
    pub filename: String,
    /// Length unit declared by the bundle (`m`, `mm`, ...). Informational only.
    pub units: String,
}

/// One placed instance of a geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub part_name: String,
    pub geometry_id: String,
    /// Column-major 4x4 matrix; translation lives in entries 12..=14.
    pub world_transform: [f64; 16],
    #[serde(default)]
    pub light_emitting_objects: Vec<LightEmittingObject>,
}

/// Region of a part where light leaves the luminaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightEmittingObject {
    pub part_name: String,
    pub position: [f64; 3],
    pub shape_type: ShapeType,
    /// Diameter for circles, width then height for rectangles.
    #[serde(default)]
    pub shape_dimensions: Vec<f64>,
}

/// Outline of a light-emitting object. Anything that is not `circle` is a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeType {
    Circle,
    Rectangle,
}

impl ShapeType {
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("circle") {
            ShapeType::Circle
        } else {
            ShapeType::Rectangle
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Rectangle => "rectangle",
        }
    }
}

impl From<String> for ShapeType {
    fn from(name: String) -> Self {
        ShapeType::from_name(&name)
    }
}

impl From<ShapeType> for String {
    fn from(shape: ShapeType) -> Self {
        shape.name().to_string()
    }
}

/// Articulation point between parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Joint {
    pub part_name: String,
    pub position: [f64; 3],
    /// Euler angles in degrees.
    pub rotation: [f64; 3],
    /// Names of the parts hanging off this joint.
    pub children: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_shape_is_rectangle() {
        assert_eq!(ShapeType::from_name("circle"), ShapeType::Circle);
        assert_eq!(ShapeType::from_name(" Circle "), ShapeType::Circle);
        assert_eq!(ShapeType::from_name("rectangle"), ShapeType::Rectangle);
        assert_eq!(ShapeType::from_name("polygon"), ShapeType::Rectangle);
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "geometryDefinitions": [{"id": "g1", "filename": "body.obj", "units": "m"}],
            "parts": [{
                "partName": "body",
                "geometryId": "g1",
                "worldTransform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0.5,0,2,1],
                "lightEmittingObjects": [{
                    "partName": "leo",
                    "position": [0, 0, -0.01],
                    "shapeType": "hexagon",
                    "shapeDimensions": [0.2, 0.1]
                }]
            }]
        }"#;
        let scene: L3dScene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.parts[0].world_transform[12], 0.5);
        assert_eq!(
            scene.parts[0].light_emitting_objects[0].shape_type,
            ShapeType::Rectangle
        );
        assert_eq!(scene.geometry("g1").map(|g| g.filename.as_str()), Some("body.obj"));
        assert!(scene.geometry("g2").is_none());
        assert!(scene.joints.is_empty());
        assert_eq!(scene.light_emitting_object_count(), 1);
    }
}
