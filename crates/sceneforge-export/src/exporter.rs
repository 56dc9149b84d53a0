//! Scene exporter
//!
//! Walks a [`Scene`] depth-first and emits the cross-referenced file set:
//! one `.scene` file, one `.node` file per node, and `.mat`/`.mesh`/
//! `.light` side files for nodes that carry the corresponding data.
//!
//! The walk is single-threaded and synchronous. Each file write is a
//! scoped open/write/close; the first I/O failure aborts the export and
//! files already written remain on disk.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use sceneforge_core::{Error, MeshData, Result, ResultExt, Scene, SceneNode};

use crate::document::{
    LightDocument, MaterialDocument, NodeDocument, SceneDocument, TransformRows,
};
use crate::mesh::write_mesh;

/// Policy for sibling nodes whose names collide.
///
/// Filenames derive from node names, so two siblings with the same name
/// would silently overwrite each other's files. The exporter refuses to
/// guess: either the export fails, or file stems are disambiguated with a
/// numeric suffix while the written `Name` keeps the display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateNames {
    /// Abort the export with [`Error::DuplicateNodeName`]
    #[default]
    Error,
    /// Disambiguate file stems as `<Name>_2`, `<Name>_3`, ...
    Suffix,
}

impl FromStr for DuplicateNames {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(DuplicateNames::Error),
            "suffix" => Ok(DuplicateNames::Suffix),
            _ => Err(format!("Unknown duplicate-name policy: {}", s)),
        }
    }
}

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty-print the JSON-bodied files
    pub pretty: bool,
    /// What to do when sibling names collide
    pub duplicate_names: DuplicateNames,
    /// Derive tangents for UV-mapped meshes that arrive without them
    pub generate_tangents: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            duplicate_names: DuplicateNames::Error,
            generate_tangents: true,
        }
    }
}

/// Counters reported by a completed export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Number of node files written
    pub nodes_exported: usize,
    /// Total files written, including the scene file and side files
    pub files_written: usize,
}

/// Scene exporter
pub struct SceneExporter {
    options: ExportOptions,
}

impl SceneExporter {
    /// Create an exporter with default options
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
        }
    }

    /// Create an exporter with custom options
    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export a scene into the given directory.
    ///
    /// Writes `<SceneName>.scene` listing the root node files, then
    /// serializes each root node recursively. Re-exporting an unchanged
    /// scene produces byte-identical files.
    pub fn export(&self, scene: &Scene, out_dir: impl AsRef<Path>) -> Result<ExportSummary> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir).map_err(|source| Error::OutputNotWritable {
            path: out_dir.to_path_buf(),
            source,
        })?;

        info!(
            scene = %scene.name,
            nodes = scene.node_count(),
            out_dir = %out_dir.display(),
            "starting scene export"
        );

        let mut summary = ExportSummary::default();
        let root_stems = self.allocate_stems(&scene.name, &scene.roots)?;

        let document = SceneDocument {
            name: scene.name.clone(),
            nodes: root_stems.iter().map(|s| format!("{s}.node")).collect(),
        };
        self.write_json(&document, &out_dir.join(format!("{}.scene", scene.name)))?;
        summary.files_written += 1;

        for (root, stem) in scene.roots.iter().zip(&root_stems) {
            self.export_node(root, stem, out_dir, &mut summary)?;
        }

        info!(
            files = summary.files_written,
            nodes = summary.nodes_exported,
            "scene export complete"
        );
        Ok(summary)
    }

    /// Serialize one node and recurse into its children
    fn export_node(
        &self,
        node: &SceneNode,
        stem: &str,
        out_dir: &Path,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let child_stems = self.allocate_stems(&node.name, &node.children)?;

        let mut document = NodeDocument {
            kind: node.kind.as_str().to_string(),
            name: node.name.clone(),
            nodes: child_stems.iter().map(|s| format!("{s}.node")).collect(),
            transform: TransformRows::from_matrix(&node.transform),
            material: None,
            mesh: None,
            light: None,
        };

        if let Some(material) = &node.material {
            let filename = format!("{stem}.mat");
            self.write_json(&MaterialDocument::from_material(material), &out_dir.join(&filename))?;
            summary.files_written += 1;
            document.material = Some(filename);
        }

        if let Some(mesh) = &node.mesh {
            mesh.validate()
                .with_context(|| format!("mesh on node {:?}", node.name))?;
            let filename = format!("{stem}.mesh");
            self.write_mesh_file(mesh, &out_dir.join(&filename))?;
            summary.files_written += 1;
            document.mesh = Some(filename);
        }

        if let Some(light) = &node.light {
            let filename = format!("{stem}.light");
            self.write_json(&LightDocument::from_light(light), &out_dir.join(&filename))?;
            summary.files_written += 1;
            document.light = Some(filename);
        }

        let node_path = out_dir.join(format!("{stem}.node"));
        self.write_json(&document, &node_path)?;
        summary.files_written += 1;
        summary.nodes_exported += 1;

        for (child, child_stem) in node.children.iter().zip(&child_stems) {
            self.export_node(child, child_stem, out_dir, summary)?;
        }
        Ok(())
    }

    /// Derive a unique file stem per sibling, applying the duplicate policy
    fn allocate_stems(&self, parent: &str, siblings: &[SceneNode]) -> Result<Vec<String>> {
        let mut used: HashSet<String> = HashSet::new();
        let mut stems = Vec::with_capacity(siblings.len());

        for node in siblings {
            if used.insert(node.name.clone()) {
                stems.push(node.name.clone());
                continue;
            }
            match self.options.duplicate_names {
                DuplicateNames::Error => {
                    return Err(Error::DuplicateNodeName {
                        parent: parent.to_string(),
                        name: node.name.clone(),
                    });
                }
                DuplicateNames::Suffix => {
                    let mut counter = 2usize;
                    loop {
                        let candidate = format!("{}_{}", node.name, counter);
                        if used.insert(candidate.clone()) {
                            stems.push(candidate);
                            break;
                        }
                        counter += 1;
                    }
                }
            }
        }
        Ok(stems)
    }

    /// Write one JSON-bodied file
    fn write_json<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        if self.options.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), "wrote file");
        Ok(())
    }

    /// Write one `.mesh` file, deriving tangents first if configured
    fn write_mesh_file(&self, mesh: &MeshData, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        if self.options.generate_tangents && mesh.has_uvs() && mesh.tangents.is_empty() {
            let mut derived = mesh.clone();
            derived.generate_tangents();
            write_mesh(&mut writer, &derived)?;
        } else {
            write_mesh(&mut writer, mesh)?;
        }

        writer.flush()?;
        debug!(path = %path.display(), "wrote mesh file");
        Ok(())
    }
}

impl Default for SceneExporter {
    fn default() -> Self {
        Self::new()
    }
}
