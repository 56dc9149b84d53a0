//! Document model for the JSON-bodied output formats
//!
//! `.scene`, `.node`, `.mat` and `.light` files are small JSON documents.
//! Key order follows struct field order, and optional keys are omitted
//! entirely rather than written as null.

use serde::{Deserialize, Serialize};

use crate::fmt::{format_color, format_f32, format_row};
use sceneforge_core::{LightData, Mat4x4, MaterialData};

/// Scene file body (`<SceneName>.scene`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(rename = "Name")]
    pub name: String,
    /// Root node filenames, each `<RootName>.node`
    #[serde(rename = "Nodes")]
    pub nodes: Vec<String>,
}

/// The four rows of a local transform, each a space-separated
/// fixed-decimal string. Translation lives in `r3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRows {
    pub r0: String,
    pub r1: String,
    pub r2: String,
    pub r3: String,
}

impl TransformRows {
    /// Serialize a row-major matrix into its four text rows
    pub fn from_matrix(matrix: &Mat4x4) -> Self {
        Self {
            r0: format_row(&matrix.row(0)),
            r1: format_row(&matrix.row(1)),
            r2: format_row(&matrix.row(2)),
            r3: format_row(&matrix.row(3)),
        }
    }
}

/// Node file body (`<NodeName>.node`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDocument {
    /// `Object` or `Light`
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Child node filenames, depth-first export order
    #[serde(rename = "Nodes")]
    pub nodes: Vec<String>,
    #[serde(rename = "Transform")]
    pub transform: TransformRows,
    #[serde(rename = "Material", default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(rename = "Mesh", default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    #[serde(rename = "Light", default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

/// Material file body (`<NodeName>.mat`)
///
/// Only channels with a resolved image-texture source are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDocument {
    #[serde(rename = "Albedo", default, skip_serializing_if = "Option::is_none")]
    pub albedo: Option<String>,
    #[serde(rename = "Metallics", default, skip_serializing_if = "Option::is_none")]
    pub metallics: Option<String>,
    #[serde(rename = "Normal", default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
}

impl MaterialDocument {
    pub fn from_material(material: &MaterialData) -> Self {
        Self {
            albedo: material.albedo.clone(),
            metallics: material.metallics.clone(),
            normal: material.normal.clone(),
        }
    }
}

/// Light file body (`<NodeName>.light`)
///
/// Fields are an opaque pass-through of whatever the host reported;
/// values are not cross-validated against the light type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightDocument {
    #[serde(rename = "Type")]
    pub kind: String,
    /// `r g b` as fixed-decimal floats
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Energy")]
    pub energy: String,
    #[serde(rename = "Radius")]
    pub radius: String,
}

impl LightDocument {
    pub fn from_light(light: &LightData) -> Self {
        Self {
            kind: light.kind.as_str().to_string(),
            color: format_color(&light.color),
            energy: format_f32(light.energy),
            radius: format_f32(light.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneforge_core::{ColorRgb, LightKind};

    #[test]
    fn test_transform_rows_identity() {
        let rows = TransformRows::from_matrix(&Mat4x4::IDENTITY);
        assert_eq!(rows.r0, "1.0 0.0 0.0 0.0");
        assert_eq!(rows.r1, "0.0 1.0 0.0 0.0");
        assert_eq!(rows.r2, "0.0 0.0 1.0 0.0");
        assert_eq!(rows.r3, "0.0 0.0 0.0 1.0");
    }

    #[test]
    fn test_material_document_omits_absent_channels() {
        let doc = MaterialDocument::from_material(&MaterialData {
            albedo: Some("wood_albedo.png".into()),
            metallics: None,
            normal: None,
        });

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("Albedo"));
        assert!(!json.contains("Metallics"));
        assert!(!json.contains("Normal"));
    }

    #[test]
    fn test_light_document_fields() {
        let doc = LightDocument::from_light(&LightData {
            kind: LightKind::Point,
            color: ColorRgb::new(1.0, 0.5, 0.25),
            energy: 100.0,
            radius: 0.1,
        });

        assert_eq!(doc.kind, "Point");
        assert_eq!(doc.color, "1.0 0.5 0.25");
        assert_eq!(doc.energy, "100.0");
        assert_eq!(doc.radius, "0.1");
    }
}
