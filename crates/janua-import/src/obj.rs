//! Wavefront OBJ subset reader.
//!
//! Only `o`/`g` (mesh boundary), `v` (position) and `f` (face) lines carry
//! meaning; everything else is ignored. Every object or group becomes one
//! occluder mesh with a sequential id. Polygons are fan-triangulated around
//! their first vertex.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use janua_mesh::{Aabb3, Diagnostics, MeshRecord, MeshRole};
use log::info;

use crate::error::{ImportError, ObjIssue};
use crate::tokenize::{parse_position, Tokens};

/// Meshes read from an OBJ file.
#[derive(Debug, Clone)]
pub struct ObjScene {
    /// One occluder per non-empty object/group, ids starting at 0.
    pub meshes: Vec<MeshRecord>,
    /// Bounds of every position emitted into `meshes`. Empty if no triangles.
    pub bounds: Aabb3,
}

/// Read an OBJ file.
///
/// Fails only if the file cannot be opened or read; malformed lines are
/// skipped and reported through `diagnostics`.
pub fn load_obj(
    path: impl AsRef<Path>,
    diagnostics: &mut Diagnostics,
) -> Result<ObjScene, ImportError> {
    let file = File::open(path)?;
    load_obj_from_reader(BufReader::new(file), diagnostics)
}

/// Read OBJ data from any buffered reader.
pub fn load_obj_from_reader<R: BufRead>(
    mut reader: R,
    diagnostics: &mut Diagnostics,
) -> Result<ObjScene, ImportError> {
    let mut builder = ObjBuilder::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        let line = String::from_utf8_lossy(&buf);
        builder.process_line(line_number, &line, diagnostics);
    }

    let scene = builder.finish(diagnostics);
    if !scene.bounds.is_empty() {
        info!("Min: {} {} {}", scene.bounds.min.x, scene.bounds.min.y, scene.bounds.min.z);
        info!("Max: {} {} {}", scene.bounds.max.x, scene.bounds.max.y, scene.bounds.max.z);
    }
    Ok(scene)
}

/// Accumulates positions and the triangle soup of the current mesh.
#[derive(Debug, Default)]
struct ObjBuilder {
    positions: Vec<[f32; 3]>,
    current: Vec<f32>,
    meshes: Vec<MeshRecord>,
    bounds: Aabb3,
    next_id: u32,
}

impl ObjBuilder {
    fn process_line(&mut self, line_number: usize, line: &str, diagnostics: &mut Diagnostics) {
        let mut tokens = Tokens::new(line);
        match tokens.next() {
            Some("o") | Some("g") => self.flush(diagnostics),
            Some("v") => match parse_position(&mut tokens) {
                Some(p) => self.positions.push(p),
                None => diagnostics.record(
                    ObjIssue::MalformedVertex { line: line_number }.to_string(),
                ),
            },
            Some("f") => self.read_face(line_number, tokens, diagnostics),
            _ => {}
        }
    }

    fn read_face(&mut self, line_number: usize, refs: Tokens<'_>, diagnostics: &mut Diagnostics) {
        let mut corners = Vec::new();
        for reference in refs {
            match self.resolve(line_number, reference) {
                Ok(p) => corners.push(p),
                Err(issue) => diagnostics.record(issue.to_string()),
            }
        }

        if corners.len() < 3 {
            diagnostics.record(
                ObjIssue::DegenerateFace {
                    line: line_number,
                    count: corners.len(),
                }
                .to_string(),
            );
            return;
        }

        // Fan around the first corner: (v0, vi, vi+1).
        for i in 1..corners.len() - 1 {
            for p in [corners[0], corners[i], corners[i + 1]] {
                self.current.extend_from_slice(&p);
            }
        }
    }

    /// Resolve a `v[/vt][/vn]` reference to a position.
    fn resolve(&self, line: usize, reference: &str) -> Result<[f32; 3], ObjIssue> {
        let vertex = reference.split('/').next().unwrap_or_default();
        let index: i64 = vertex.parse().map_err(|_| ObjIssue::InvalidReference {
            line,
            reference: reference.to_string(),
        })?;

        let pool = self.positions.len();
        let slot = match index {
            0 => return Err(ObjIssue::ZeroReference { line }),
            i if i > 0 => i - 1,
            i => pool as i64 + i,
        };
        if slot < 0 || slot >= pool as i64 {
            return Err(ObjIssue::OutOfRange { line, index, pool });
        }
        Ok(self.positions[slot as usize])
    }

    /// Close the current mesh if it has any triangles.
    fn flush(&mut self, diagnostics: &mut Diagnostics) {
        if self.current.is_empty() {
            return;
        }
        let vertices = std::mem::take(&mut self.current);
        for p in vertices.chunks_exact(3) {
            self.bounds.include_point([p[0], p[1], p[2]]);
        }
        match MeshRecord::new(self.next_id, MeshRole::Occluder, vertices) {
            Ok(mesh) => self.meshes.push(mesh),
            Err(e) => diagnostics.record(format!("mesh {}: {e}", self.next_id)),
        }
        self.next_id += 1;
    }

    fn finish(mut self, diagnostics: &mut Diagnostics) -> ObjScene {
        self.flush(diagnostics);
        ObjScene {
            meshes: self.meshes,
            bounds: self.bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn load(text: &str) -> (ObjScene, Diagnostics) {
        let mut diag = Diagnostics::new();
        let scene = load_obj_from_reader(text.as_bytes(), &mut diag).unwrap();
        (scene, diag)
    }

    #[test]
    fn test_single_triangle_at_eof() {
        let (scene, diag) = load("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3");
        assert!(!diag.has_errors());
        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.id(), 0);
        assert_eq!(mesh.role(), MeshRole::Occluder);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_references() {
        let (scene, diag) = load("v 1 1 1\nv 2 2 2\nv 3 3 3\nv 4 4 4\nf -1 -2 -4\n");
        assert!(!diag.has_errors());
        assert_eq!(
            scene.meshes[0].vertices(),
            &[4.0, 4.0, 4.0, 3.0, 3.0, 3.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_negative_reference_is_relative_to_current_pool() {
        let text = "v 1 0 0\nv 2 0 0\nv 3 0 0\nf -3 -2 -1\nv 4 0 0\nf -3 -2 -1\n";
        let (scene, _) = load(text);
        let xs: Vec<f32> = scene.meshes[0].positions().map(|p| p[0]).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_pentagon_fan() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let (scene, diag) = load(text);
        assert!(!diag.has_errors());
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.triangle_count(), 3);

        let pts: Vec<_> = mesh.positions().collect();
        for tri in pts.chunks(3) {
            assert_eq!(tri[0], [0.0, 0.0, 0.0]);
        }
        assert_eq!(pts[1..3], [[1.0, 0.0, 0.0], [2.0, 1.0, 0.0]]);
        assert_eq!(pts[4..6], [[2.0, 1.0, 0.0], [1.0, 2.0, 0.0]]);
        assert_eq!(pts[7..9], [[1.0, 2.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_texture_and_normal_components_ignored() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3//1\n";
        let (scene, diag) = load(text);
        assert!(!diag.has_errors());
        assert_eq!(scene.meshes[0].triangle_count(), 1);
    }

    #[test]
    fn test_objects_split_meshes() {
        let text = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
f 1 2 4
f 2 3 4
g empty
o third
f 1 3 4
";
        let (scene, _) = load(text);
        let ids: Vec<_> = scene.meshes.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let tris: Vec<_> = scene.meshes.iter().map(|m| m.triangle_count()).collect();
        assert_eq!(tris, vec![1, 2, 1]);
        assert!(scene.meshes.iter().all(|m| m.role() == MeshRole::Occluder));
    }

    #[test]
    fn test_zero_reference_skipped() {
        let (scene, diag) = load("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 0 2 3\n");
        assert_eq!(scene.meshes[0].triangle_count(), 1);
        assert_eq!(diag.len(), 1);
        assert!(diag.iter().next().unwrap().contains("can't be zero"));
    }

    #[test]
    fn test_bad_references_leave_degenerate_face() {
        let (scene, diag) = load("v 0 0 0\nv 1 0 0\nf 1 2 7\nf 1 x 2\n");
        assert!(scene.meshes.is_empty());
        assert!(scene.bounds.is_empty());
        let messages: Vec<_> = diag.iter().collect();
        assert_eq!(messages.len(), 4);
        assert!(messages[0].contains("out of range"));
        assert!(messages[1].contains("at least 3"));
        assert!(messages[2].contains("invalid face vertex reference"));
        assert!(messages[3].contains("at least 3"));
    }

    #[test]
    fn test_malformed_vertex_not_added() {
        let (scene, diag) = load("v 0 0\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(diag.len(), 1);
        assert_eq!(
            scene.meshes[0].vertices(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_other_lines_ignored() {
        let text = "# comment\nmtllib scene.mtl\n\nusemtl stone\ns off\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n";
        let (scene, diag) = load(text);
        assert!(!diag.has_errors());
        assert_eq!(scene.meshes.len(), 1);
    }

    #[test]
    fn test_bounds_cover_only_emitted_positions() {
        let text = "\
v -100 -100 -100
v 100 100 100
v -1 -2 -3
v -4 -5 -6
v -7 -8 -0.5
f 3 4 5
";
        let (scene, _) = load(text);
        let bounds = scene.meshes[0].bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -7.0);
        assert_relative_eq!(bounds.min.y, -8.0);
        assert_relative_eq!(bounds.min.z, -6.0);
        assert_relative_eq!(bounds.max.x, -1.0);
        assert_relative_eq!(bounds.max.y, -2.0);
        assert_relative_eq!(bounds.max.z, -0.5);
        assert_eq!(scene.bounds, bounds);
    }

    #[test]
    fn test_empty_input() {
        let (scene, diag) = load("");
        assert!(scene.meshes.is_empty());
        assert!(scene.bounds.is_empty());
        assert!(!diag.has_errors());
    }
}
