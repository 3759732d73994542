//! Wavefront OBJ parser.
//!
//! Reads the subset of OBJ needed for triangle meshes, one directive per line:
//!
//! - `v x y z` - vertex position
//! - `vn x y z` - vertex normal
//! - `f a/.. b/.. c/..` - face; only the index before the first `/` is used
//!
//! Every other line (comments, `vt`, groups, materials) is skipped. Values are
//! returned exactly as written in the file: indices stay 1-based and no
//! coordinate conversion is applied.

use std::path::Path;

use lumen_math::Vec3;
use thiserror::Error;

/// Errors that can occur while reading an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: `{directive}` is missing its {field} component")]
    MissingField {
        line: usize,
        directive: &'static str,
        field: &'static str,
    },

    #[error("Line {line}: invalid number `{value}`")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: invalid face index `{value}`")]
    InvalidIndex { line: usize, value: String },

    #[error("Line {line}: face has {count} vertices, at least 3 are required")]
    DegenerateFace { line: usize, count: usize },
}

/// Result type for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

/// Raw geometry read from an OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjData {
    /// Vertex positions in file order
    pub positions: Vec<Vec3>,

    /// Vertex normals in file order
    pub normals: Vec<Vec3>,

    /// Triangles as 1-based vertex indices in file winding order.
    /// Polygons are fan-triangulated around their first vertex.
    pub faces: Vec<[usize; 3]>,
}

impl ObjData {
    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the file provided vertex normals.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// Parse OBJ text.
pub fn parse_obj(content: &str) -> ObjResult<ObjData> {
    let mut data = ObjData::default();

    for (i, line) in content.lines().enumerate() {
        let line_num = i + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => data.positions.push(parse_vec3(&mut tokens, line_num, "v")?),
            Some("vn") => data.normals.push(parse_vec3(&mut tokens, line_num, "vn")?),
            Some("f") => {
                let indices = tokens
                    .map(|token| parse_index(token, line_num))
                    .collect::<ObjResult<Vec<usize>>>()?;

                if indices.len() < 3 {
                    return Err(ObjError::DegenerateFace {
                        line: line_num,
                        count: indices.len(),
                    });
                }

                for k in 1..indices.len() - 1 {
                    data.faces.push([indices[0], indices[k], indices[k + 1]]);
                }
            }
            _ => {}
        }
    }

    log::debug!(
        "Parsed OBJ: {} vertices, {} normals, {} triangles",
        data.positions.len(),
        data.normals.len(),
        data.faces.len()
    );

    Ok(data)
}

/// Read and parse an OBJ file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<ObjData> {
    let path = path.as_ref();
    log::debug!("Loading OBJ: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    parse_obj(&content)
}

fn parse_vec3<'a, I>(tokens: &mut I, line: usize, directive: &'static str) -> ObjResult<Vec3>
where
    I: Iterator<Item = &'a str>,
{
    let mut component = |field: &'static str| -> ObjResult<f64> {
        let value = tokens.next().ok_or(ObjError::MissingField {
            line,
            directive,
            field,
        })?;
        value.parse::<f64>().map_err(|_| ObjError::InvalidNumber {
            line,
            value: value.to_string(),
        })
    };

    let x = component("x")?;
    let y = component("y")?;
    let z = component("z")?;
    Ok(Vec3::new(x, y, z))
}

/// Parse the vertex index of a face token such as `7`, `7/2` or `7//3`.
fn parse_index(token: &str, line: usize) -> ObjResult<usize> {
    let vertex = token.split('/').next().unwrap_or_default();

    match vertex.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(ObjError::InvalidIndex {
            line,
            value: token.to_string(),
        }),
    }
}
