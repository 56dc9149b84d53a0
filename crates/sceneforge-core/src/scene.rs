//! Scene-graph snapshot model
//!
//! A `Scene` is a read-only snapshot of a host application's scene graph,
//! built once per export by an adapter (the CLI deserializes it from a
//! scene-description JSON document; library callers construct it directly).
//! Nodes own their children exclusively, so the structure is a tree with
//! no cycles and no shared ownership.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ColorRgb, Mat4x4, Vec2, Vec3};

/// Kind of a scene node.
///
/// Camera nodes are reserved by the file format but not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Object,
    Light,
}

impl NodeKind {
    /// The `Type` string written into node files
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Object => "Object",
            NodeKind::Light => "Light",
        }
    }
}

/// Kind of a light source. Values pass through unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Point,
    Directional,
}

impl LightKind {
    /// The `Type` string written into light files
    pub fn as_str(&self) -> &'static str {
        match self {
            LightKind::Point => "Point",
            LightKind::Directional => "Directional",
        }
    }
}

/// Light parameters as reported by the host object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,
    pub color: ColorRgb,
    pub energy: f32,
    pub radius: f32,
}

/// Texture channel references for a node's surface appearance.
///
/// A channel is `None` when the host shader input was not connected to an
/// image texture; such channels are omitted from the material file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialData {
    #[serde(default)]
    pub albedo: Option<String>,
    #[serde(default)]
    pub metallics: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
}

impl MaterialData {
    /// Number of channels with a resolved texture path
    pub fn channel_count(&self) -> usize {
        [&self.albedo, &self.metallics, &self.normal]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

/// One corner of a polygon face.
///
/// Indices are zero-based into the mesh attribute arrays. The uv and
/// tangent indices are absent for meshes without a UV layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corner {
    pub position: u32,
    pub normal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent: Option<u32>,
}

impl Corner {
    pub fn new(position: u32, normal: u32) -> Self {
        Self {
            position,
            normal,
            uv: None,
            tangent: None,
        }
    }

    pub fn with_uv(mut self, uv: u32) -> Self {
        self.uv = Some(uv);
        self
    }

    pub fn with_tangent(mut self, tangent: u32) -> Self {
        self.tangent = Some(tangent);
        self
    }
}

/// One polygon face, stored with whatever arity the host reports.
///
/// Faces are not re-triangulated; n-gons survive into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub corners: Vec<Corner>,
}

impl Face {
    pub fn new(corners: Vec<Corner>) -> Self {
        Self { corners }
    }
}

/// Polygon mesh geometry in indexed form.
///
/// Only UV layer 0 is represented. A mesh without a UV layer has empty
/// `uvs` and `tangents` arrays and corners without uv/tangent indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    #[serde(default)]
    pub uvs: Vec<Vec2>,
    #[serde(default)]
    pub tangents: Vec<Vec3>,
    #[serde(default)]
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Whether the mesh carries a UV layer
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Check that every face index is within bounds of its attribute array.
    ///
    /// This is the only validation the model performs; geometry itself is
    /// passed through as-is, including non-manifold or degenerate faces.
    pub fn validate(&self) -> Result<()> {
        for face in &self.faces {
            for corner in &face.corners {
                check_index("position", corner.position, self.positions.len())?;
                check_index("normal", corner.normal, self.normals.len())?;
                if let Some(uv) = corner.uv {
                    check_index("uv", uv, self.uvs.len())?;
                }
                if let Some(tangent) = corner.tangent {
                    check_index("tangent", tangent, self.tangents.len())?;
                }
            }
        }
        Ok(())
    }

    /// Derive per-face tangents for a UV-mapped mesh that arrived without
    /// them, using the UV-delta method over each face's first triangle.
    ///
    /// No-op when the mesh has no UV layer or already carries tangents.
    /// Faces whose UV area degenerates fall back to the X axis.
    pub fn generate_tangents(&mut self) {
        if !self.has_uvs() || !self.tangents.is_empty() {
            return;
        }

        let mut unique: Vec<Vec3> = Vec::new();
        let mut index_of = HashMap::new();

        for face in &mut self.faces {
            let tangent = face_tangent(&face.corners, &self.positions, &self.uvs);

            let key = [tangent.x.to_bits(), tangent.y.to_bits(), tangent.z.to_bits()];
            let index = *index_of.entry(key).or_insert_with(|| {
                unique.push(tangent);
                (unique.len() - 1) as u32
            });

            for corner in &mut face.corners {
                corner.tangent = Some(index);
            }
        }

        self.tangents = unique;
    }
}

fn check_index(attribute: &'static str, index: u32, len: usize) -> Result<()> {
    if (index as usize) < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds {
            attribute,
            index,
            len,
        })
    }
}

/// Tangent of one face from its first triangle's position/UV deltas
fn face_tangent(corners: &[Corner], positions: &[Vec3], uvs: &[Vec2]) -> Vec3 {
    if corners.len() < 3 {
        return Vec3::X;
    }

    let fetch = |c: &Corner| -> Option<(Vec3, Vec2)> {
        let p = positions.get(c.position as usize)?;
        let uv = uvs.get(c.uv? as usize)?;
        Some((*p, *uv))
    };

    let (Some((p0, uv0)), Some((p1, uv1)), Some((p2, uv2))) =
        (fetch(&corners[0]), fetch(&corners[1]), fetch(&corners[2]))
    else {
        return Vec3::X;
    };

    let edge1 = p1.sub(&p0);
    let edge2 = p2.sub(&p0);
    let du1 = uv1.x - uv0.x;
    let dv1 = uv1.y - uv0.y;
    let du2 = uv2.x - uv0.x;
    let dv2 = uv2.y - uv0.y;

    let det = du1 * dv2 - du2 * dv1;
    if det.abs() < 1e-12 {
        return Vec3::X;
    }

    let r = 1.0 / det;
    edge1.scale(dv2 * r).sub(&edge2.scale(dv1 * r)).normalize()
}

/// One entry in the scene hierarchy, corresponding to a host scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub transform: Mat4x4,
    #[serde(default)]
    pub children: Vec<SceneNode>,
    #[serde(default)]
    pub material: Option<MaterialData>,
    #[serde(default)]
    pub mesh: Option<MeshData>,
    #[serde(default)]
    pub light: Option<LightData>,
}

impl SceneNode {
    /// Create an object node at the origin with no attachments
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Object,
            transform: Mat4x4::IDENTITY,
            children: Vec::new(),
            material: None,
            mesh: None,
            light: None,
        }
    }

    /// Create a light node carrying the given light parameters
    pub fn light(name: impl Into<String>, light: LightData) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Light,
            transform: Mat4x4::IDENTITY,
            children: Vec::new(),
            material: None,
            mesh: None,
            light: Some(light),
        }
    }

    pub fn with_transform(mut self, transform: Mat4x4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_material(mut self, material: MaterialData) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Count this node and all of its descendants
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_data("node with empty name"));
        }
        if let Some(mesh) = &self.mesh {
            mesh.validate()?;
        }
        check_sibling_names(&self.name, &self.children)?;
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    fn collect_statistics(&self, depth: usize, stats: &mut SceneStatistics) {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);
        if self.mesh.is_some() {
            stats.meshes += 1;
        }
        if self.material.is_some() {
            stats.materials += 1;
        }
        if self.light.is_some() {
            stats.lights += 1;
        }
        for child in &self.children {
            child.collect_statistics(depth + 1, stats);
        }
    }
}

fn check_sibling_names(parent: &str, siblings: &[SceneNode]) -> Result<()> {
    let mut seen = HashSet::new();
    for node in siblings {
        if !seen.insert(node.name.as_str()) {
            return Err(Error::DuplicateNodeName {
                parent: parent.to_string(),
                name: node.name.clone(),
            });
        }
    }
    Ok(())
}

/// Counts gathered by [`Scene::statistics`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SceneStatistics {
    pub nodes: usize,
    pub meshes: usize,
    pub materials: usize,
    pub lights: usize,
    pub max_depth: usize,
}

/// Top-level container naming the export and listing root nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub roots: Vec<SceneNode>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: SceneNode) -> Self {
        self.roots.push(root);
        self
    }

    /// Count every node in the scene
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SceneNode::node_count).sum()
    }

    /// Check duplicate sibling names and mesh index bounds across the tree.
    ///
    /// Returns the first failure found, depth-first.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_data("scene with empty name"));
        }
        check_sibling_names(&self.name, &self.roots)?;
        for root in &self.roots {
            root.validate()?;
        }
        Ok(())
    }

    /// Gather node/mesh/material/light counts and tree depth
    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics::default();
        for root in &self.roots {
            root.collect_statistics(1, &mut stats);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> MeshData {
        MeshData {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::new(0.0, 0.0, 1.0)],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            tangents: Vec::new(),
            faces: vec![Face::new(vec![
                Corner::new(0, 0).with_uv(0),
                Corner::new(1, 0).with_uv(1),
                Corner::new(2, 0).with_uv(2),
                Corner::new(3, 0).with_uv(3),
            ])],
        }
    }

    #[test]
    fn test_node_count() {
        let scene = Scene::new("Test")
            .with_root(
                SceneNode::object("A")
                    .with_child(SceneNode::object("B").with_child(SceneNode::object("C"))),
            )
            .with_root(SceneNode::object("D"));

        assert_eq!(scene.node_count(), 4);
    }

    #[test]
    fn test_statistics() {
        let light = LightData {
            kind: LightKind::Point,
            color: ColorRgb::WHITE,
            energy: 100.0,
            radius: 0.25,
        };
        let scene = Scene::new("Test").with_root(
            SceneNode::object("Root")
                .with_mesh(quad_mesh())
                .with_material(MaterialData {
                    albedo: Some("albedo.png".into()),
                    ..Default::default()
                })
                .with_child(SceneNode::light("Lamp", light)),
        );

        let stats = scene.statistics();
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.meshes, 1);
        assert_eq!(stats.materials, 1);
        assert_eq!(stats.lights, 1);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_validate_duplicate_siblings() {
        let scene = Scene::new("Test").with_root(
            SceneNode::object("Root")
                .with_child(SceneNode::object("Child"))
                .with_child(SceneNode::object("Child")),
        );

        match scene.validate() {
            Err(Error::DuplicateNodeName { parent, name }) => {
                assert_eq!(parent, "Root");
                assert_eq!(name, "Child");
            }
            other => panic!("expected DuplicateNodeName, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_duplicate_roots() {
        let scene = Scene::new("Test")
            .with_root(SceneNode::object("Node_01"))
            .with_root(SceneNode::object("Node_01"));

        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_validate_index_bounds() {
        let mut mesh = quad_mesh();
        mesh.faces[0].corners[0].position = 99;

        let scene = Scene::new("Test").with_root(SceneNode::object("Bad").with_mesh(mesh));

        match scene.validate() {
            Err(Error::IndexOutOfBounds { attribute, index, len }) => {
                assert_eq!(attribute, "position");
                assert_eq!(index, 99);
                assert_eq!(len, 4);
            }
            other => panic!("expected IndexOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_tangents() {
        let mut mesh = quad_mesh();
        mesh.generate_tangents();

        assert!(!mesh.tangents.is_empty());
        for face in &mesh.faces {
            for corner in &face.corners {
                let index = corner.tangent.expect("tangent index assigned");
                assert!((index as usize) < mesh.tangents.len());
            }
        }
        // Quad in the XY plane with aligned UVs tangent points along +X
        let t = mesh.tangents[0];
        assert!((t.x - 1.0).abs() < 1e-5);
        assert!(t.y.abs() < 1e-5);
        assert!(t.z.abs() < 1e-5);

        mesh.validate().expect("generated indices stay in bounds");
    }

    #[test]
    fn test_generate_tangents_no_uvs() {
        let mut mesh = quad_mesh();
        mesh.uvs.clear();
        for face in &mut mesh.faces {
            for corner in &mut face.corners {
                corner.uv = None;
            }
        }

        mesh.generate_tangents();
        assert!(mesh.tangents.is_empty());
    }
}
