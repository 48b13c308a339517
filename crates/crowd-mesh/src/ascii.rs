//! ASCII mesh file loader.
//!
//! # Format
//!
//! Line-oriented, whitespace-separated, `#` starts a comment.  Sections must
//! appear in order; each section header carries its record count:
//!
//! ```text
//! crowdmesh
//! vertices 4
//! -1.0 -1.0 0.0        # x y z (z optional, defaults to 0)
//!  1.0 -1.0 0.0
//!  1.0  1.0 0.0
//! -1.0  1.0 0.0
//! nodes 1
//! 4 0 1 2 3            # vertex count, then CCW vertex indices
//! portals 0            # nodeA nodeB vertexA vertexB
//! obstacles 0          # x0 y0 x1 y1 prev next
//! ```
//!
//! The loader only checks syntax and index validity; geometric validation
//! (convexity, planarity) is the author's responsibility, as with every
//! navmesh baking pipeline.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crowd_core::{NodeId, ObstacleId, Vec2, VertexId};

use crate::builder::NavMeshBuilder;
use crate::error::{MeshError, MeshResult};
use crate::mesh::NavMesh;

const MAGIC: &str = "crowdmesh";

/// Load a mesh from a file path.
pub fn load_path<P: AsRef<Path>>(path: P) -> MeshResult<NavMesh> {
    load_reader(File::open(path)?)
}

/// Load a mesh from any reader.
pub fn load_reader<R: Read>(reader: R) -> MeshResult<NavMesh> {
    let mut lines = Lines::new(BufReader::new(reader));
    let mut builder = NavMeshBuilder::new();

    let magic = lines.next_line()?;
    if magic.trim() != MAGIC {
        return Err(lines.err(format!("expected `{MAGIC}` header, got `{}`", magic.trim())));
    }

    // ── vertices ──────────────────────────────────────────────────────────
    let count = lines.section_count("vertices")?;
    for _ in 0..count {
        let fields = lines.fields()?;
        if fields.len() != 2 && fields.len() != 3 {
            return Err(lines.err(format!("vertex needs 2 or 3 floats, got {}", fields.len())));
        }
        let x = lines.parse_f32(&fields[0])?;
        let y = lines.parse_f32(&fields[1])?;
        let z = if fields.len() == 3 {
            lines.parse_f32(&fields[2])?
        } else {
            0.0
        };
        builder.add_vertex_with_elevation(Vec2::new(x, y), z);
    }

    // ── nodes ─────────────────────────────────────────────────────────────
    let count = lines.section_count("nodes")?;
    for _ in 0..count {
        let fields = lines.fields()?;
        let vert_count = lines.parse_usize(&fields[0])?;
        if fields.len() != vert_count + 1 {
            return Err(lines.err(format!(
                "node declares {vert_count} vertices but lists {}",
                fields.len() - 1
            )));
        }
        let vertices: Vec<VertexId> = fields[1..]
            .iter()
            .map(|f| lines.parse_usize(f).map(|i| VertexId(i as u32)))
            .collect::<MeshResult<_>>()?;
        builder
            .add_node(&vertices)
            .map_err(|e| lines.err(e.to_string()))?;
    }

    // ── portals ───────────────────────────────────────────────────────────
    let count = lines.section_count("portals")?;
    for _ in 0..count {
        let fields = lines.fields()?;
        if fields.len() != 4 {
            return Err(lines.err(format!("portal needs 4 indices, got {}", fields.len())));
        }
        let a = NodeId(lines.parse_usize(&fields[0])? as u32);
        let b = NodeId(lines.parse_usize(&fields[1])? as u32);
        let va = VertexId(lines.parse_usize(&fields[2])? as u32);
        let vb = VertexId(lines.parse_usize(&fields[3])? as u32);
        builder
            .add_portal(a, b, va, vb)
            .map_err(|e| lines.err(e.to_string()))?;
    }

    // ── obstacles ─────────────────────────────────────────────────────────
    let count = lines.section_count("obstacles")?;
    for _ in 0..count {
        let fields = lines.fields()?;
        if fields.len() != 6 {
            return Err(lines.err(format!("obstacle needs 6 fields, got {}", fields.len())));
        }
        let p0 = Vec2::new(lines.parse_f32(&fields[0])?, lines.parse_f32(&fields[1])?);
        let p1 = Vec2::new(lines.parse_f32(&fields[2])?, lines.parse_f32(&fields[3])?);
        let prev = ObstacleId(lines.parse_usize(&fields[4])? as u32);
        let next = ObstacleId(lines.parse_usize(&fields[5])? as u32);
        builder.add_obstacle(p0, p1, prev, next);
    }

    builder.build()
}

// ── Line cursor ───────────────────────────────────────────────────────────────

/// Wraps a buffered reader with line counting, comment stripping and
/// position-aware error construction.
struct Lines<R: BufRead> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    fn err(&self, msg: String) -> MeshError {
        MeshError::Parse {
            line: self.line_no,
            msg,
        }
    }

    /// Next non-empty, non-comment line.
    fn next_line(&mut self) -> MeshResult<String> {
        loop {
            let mut buf = String::new();
            let read = self.reader.read_line(&mut buf)?;
            self.line_no += 1;
            if read == 0 {
                return Err(self.err("unexpected end of file".into()));
            }
            let content = match buf.split_once('#') {
                Some((before, _)) => before,
                None => &buf,
            };
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }

    /// Next line split into whitespace-separated fields.
    fn fields(&mut self) -> MeshResult<Vec<String>> {
        Ok(self
            .next_line()?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    /// Read a `<name> <count>` section header.
    fn section_count(&mut self, name: &str) -> MeshResult<usize> {
        let fields = self.fields()?;
        if fields.len() != 2 || fields[0] != name {
            return Err(self.err(format!("expected `{name} <count>` section header")));
        }
        self.parse_usize(&fields[1])
    }

    fn parse_f32(&self, field: &str) -> MeshResult<f32> {
        field
            .parse::<f32>()
            .map_err(|_| self.err(format!("`{field}` is not a number")))
    }

    fn parse_usize(&self, field: &str) -> MeshResult<usize> {
        field
            .parse::<usize>()
            .map_err(|_| self.err(format!("`{field}` is not an index")))
    }
}
