//! Modified-OBJ mesh serializer
//!
//! Flattens a [`MeshData`] into the `.mesh` text format: `v`/`vn`/`vt`/
//! `vtan` attribute sections followed by `f` lines whose corners are
//! zero-based `position/uv/normal/tangent` index tuples.
//!
//! The serializer is a faithful projection: faces keep whatever arity the
//! host stored (n-gons are not re-triangulated) and geometry is written
//! as-is without repair.

use std::io::{self, Write};

use sceneforge_core::{Corner, MeshData};

use crate::fmt::{format_vec2, format_vec3};

/// Write a mesh in the modified-OBJ text format.
///
/// A mesh without a UV layer gets no `vt`/`vtan` sections and its corners
/// degrade to `position//normal`. A mesh with zero polygons produces a
/// valid file with attribute sections only.
pub fn write_mesh<W: Write>(writer: &mut W, mesh: &MeshData) -> io::Result<()> {
    for position in &mesh.positions {
        writeln!(writer, "v {}", format_vec3(position))?;
    }
    for normal in &mesh.normals {
        writeln!(writer, "vn {}", format_vec3(normal))?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {}", format_vec2(uv))?;
    }
    for tangent in &mesh.tangents {
        writeln!(writer, "vtan {}", format_vec3(tangent))?;
    }

    for face in &mesh.faces {
        let corners = face
            .corners
            .iter()
            .map(corner_token)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "f {}", corners)?;
    }

    Ok(())
}

/// Serialize a mesh to a string
pub fn mesh_to_string(mesh: &MeshData) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec<u8> cannot fail
    write_mesh(&mut buffer, mesh).unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}

/// One corner as an index tuple.
///
/// Full tuple is `position/uv/normal/tangent`; without a tangent the slot
/// is dropped (`position/uv/normal`), and without a UV layer the corner
/// degrades to the OBJ-style `position//normal`.
fn corner_token(corner: &Corner) -> String {
    match (corner.uv, corner.tangent) {
        (Some(uv), Some(tangent)) => {
            format!("{}/{}/{}/{}", corner.position, uv, corner.normal, tangent)
        }
        (Some(uv), None) => format!("{}/{}/{}", corner.position, uv, corner.normal),
        (None, _) => format!("{}//{}", corner.position, corner.normal),
    }
}
