//! Triangle mesh entity loaded from an OBJ file.
//!
//! Geometry is converted from the OBJ (right-handed) convention to the
//! renderer's left-handed one at load time: Z is negated for positions and
//! normals, and the winding of every face is reversed. The mesh is immutable
//! afterwards.

use std::path::Path;

use lumen_core::obj::{load_obj, ObjData, ObjError};
use lumen_math::{Aabb, Vec3};
use thiserror::Error;

use crate::{
    hittable::{RayHit, SceneEntity},
    sphere::Sphere,
    triangle::{moller_trumbore, TriangleHit},
    Material, Ray,
};

/// Errors that can occur while building a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ error: {0}")]
    Obj(#[from] ObjError),

    #[error("Face {face} references {kind} {index}, but only {count} are defined")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: usize,
        count: usize,
    },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// An indexed triangle mesh with a bounding-sphere pre-filter.
pub struct Mesh {
    positions: Vec<Vec3>,
    /// One normal per position slot
    normals: Vec<Vec3>,
    /// 0-based indices, validated against `positions` and `normals`
    faces: Vec<[usize; 3]>,
    bounds: Sphere,
    material: Material,
}

impl Mesh {
    /// Load an OBJ file, scaling then offsetting every vertex.
    pub fn load<P: AsRef<Path>>(
        path: P,
        offset: Vec3,
        scale: f64,
        material: Material,
    ) -> MeshResult<Self> {
        let path = path.as_ref();
        let data = load_obj(path)?;
        let mesh = Self::from_obj(&data, offset, scale, material)?;

        log::debug!(
            "Loaded mesh {}: {} vertices, {} triangles, bounds center {:?} radius {:.3}",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.bounds.center(),
            mesh.bounds.radius()
        );

        Ok(mesh)
    }

    /// Build a mesh from parsed OBJ data.
    pub fn from_obj(
        data: &ObjData,
        offset: Vec3,
        scale: f64,
        material: Material,
    ) -> MeshResult<Self> {
        let positions: Vec<Vec3> = data
            .positions
            .iter()
            .map(|p| Vec3::new(p.x * scale, p.y * scale, -p.z * scale) + offset)
            .collect();

        let mut normals: Vec<Vec3> = data
            .normals
            .iter()
            .map(|n| Vec3::new(n.x, n.y, -n.z))
            .collect();

        let has_normals = data.has_normals();
        let mut faces = Vec::with_capacity(data.triangle_count());
        for (face_index, &[a, b, c]) in data.faces.iter().enumerate() {
            let mut face = [0; 3];
            // Reversed winding
            for (slot, index) in face.iter_mut().zip([c, b, a]) {
                *slot = resolve_index(face_index, "vertex", index, positions.len())?;
                if has_normals {
                    resolve_index(face_index, "normal", index, normals.len())?;
                }
            }
            faces.push(face);
        }

        if !has_normals && !faces.is_empty() {
            log::warn!("OBJ data has no vertex normals, generating smooth normals");
            normals = smooth_normals(&positions, &faces);
        }

        let bounds = bounding_sphere(&positions, material);

        Ok(Self {
            positions,
            normals,
            faces,
            bounds,
            material,
        })
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// The broad-phase sphere tested before any face.
    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounds
    }

    fn face_hit(&self, ray: &Ray, face: &[usize; 3]) -> Option<RayHit> {
        let [i0, i1, i2] = *face;
        let (v0, v1, v2) = (self.positions[i0], self.positions[i1], self.positions[i2]);

        let TriangleHit { t, u, v } = moller_trumbore(ray, v0, v1, v2)?;

        let interpolated =
            (1.0 - u - v) * self.normals[i0] + u * self.normals[i1] + v * self.normals[i2];
        // Opposing vertex normals can cancel out, fall back to the face normal
        let normal = interpolated
            .try_normalize()
            .or_else(|| (v1 - v0).cross(v2 - v0).try_normalize())?;

        Some(RayHit::new(ray, t, normal, self.material).with_barycentric(u, v))
    }
}

impl SceneEntity for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        self.bounds.intersect(ray)?;

        let mut nearest: Option<(f64, RayHit)> = None;
        for face in &self.faces {
            let Some(hit) = self.face_hit(ray, face) else {
                continue;
            };

            let distance = ray.distance_to(hit.position);
            // Strict comparison: the first face scanned wins ties
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, hit));
            }
        }

        nearest.map(|(_, hit)| hit)
    }

    fn material(&self) -> Material {
        self.material
    }
}

/// Map a 1-based OBJ index to a 0-based slot.
fn resolve_index(face: usize, kind: &'static str, index: usize, count: usize) -> MeshResult<usize> {
    if (1..=count).contains(&index) {
        Ok(index - 1)
    } else {
        Err(MeshError::IndexOutOfRange {
            face,
            kind,
            index,
            count,
        })
    }
}

/// Sphere centered on the bounding box of `positions`, with radius equal to
/// half of the box's longest side.
fn bounding_sphere(positions: &[Vec3], material: Material) -> Sphere {
    let aabb = Aabb::enclosing(positions.iter().copied());
    if aabb.is_empty() {
        return Sphere::new(Vec3::ZERO, 0.0, material);
    }

    Sphere::new(aabb.centroid(), aabb.max_extent() / 2.0, material)
}

/// Area-weighted average of the face normals around each vertex.
fn smooth_normals(positions: &[Vec3], faces: &[[usize; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for &[i0, i1, i2] in faces {
        let face_normal = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::obj::parse_obj;

    // Right triangle in the XY plane, normals facing the camera at the origin
    // once Z is flipped
    const TRIANGLE_OBJ: &str = "\
v 0 0 -5
v 2 0 -5
v 0 2 -5
vn 0 0 1
vn 0 0 1
vn 0 0 1
f 1//1 2//2 3//3
";

    fn load(content: &str, offset: Vec3, scale: f64) -> MeshResult<Mesh> {
        let data = parse_obj(content)?;
        Mesh::from_obj(&data, offset, scale, Material::default())
    }

    #[test]
    fn test_handedness_conversion() {
        let mesh = load(TRIANGLE_OBJ, Vec3::new(1.0, 0.0, 0.0), 2.0).unwrap();

        // Scaled, Z negated, then offset
        assert_eq!(mesh.positions[0], Vec3::new(1.0, 0.0, 10.0));
        assert_eq!(mesh.positions[1], Vec3::new(5.0, 0.0, 10.0));
        // Normals flip Z but are not scaled or offset
        assert_eq!(mesh.normals[0], Vec3::new(0.0, 0.0, -1.0));
        // Winding reversed to (third, second, first)
        assert_eq!(mesh.faces, vec![[2, 1, 0]]);
    }

    #[test]
    fn test_bounding_sphere() {
        let mesh = load(TRIANGLE_OBJ, Vec3::ZERO, 1.0).unwrap();
        let bounds = mesh.bounding_sphere();

        assert_eq!(bounds.center(), Vec3::new(1.0, 1.0, 5.0));
        assert_eq!(bounds.radius(), 1.0);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_mesh_hit_uses_interpolated_normal() {
        let mesh = load(TRIANGLE_OBJ, Vec3::ZERO, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(0.8, 0.8, 0.0), Vec3::Z);

        let hit = mesh.intersect(&ray).expect("should hit");

        assert!((hit.position - Vec3::new(0.8, 0.8, 5.0)).length() < 1e-9);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_smooth_normal_interpolation() {
        let obj = "\
v 0 0 -5
v 2 0 -5
v 0 2 -5
vn 1 0 0
vn 0 1 0
vn 0 0 1
f 1//1 2//2 3//3
";
        let mesh = load(obj, Vec3::ZERO, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(0.6, 0.6, 0.0), Vec3::Z);

        let hit = mesh.intersect(&ray).expect("should hit");

        // Reversed face [v3, v2, v1]: weights (1-u-v, u, v) map to (n3, n2, n1)
        let expected = ((1.0 - hit.u - hit.v) * Vec3::new(0.0, 0.0, -1.0)
            + hit.u * Vec3::Y
            + hit.v * Vec3::X)
            .normalize();
        assert!((hit.normal - expected).length() < 1e-9);
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
        // Neither flat nor axis aligned
        assert!(hit.normal.x > 0.0 && hit.normal.y > 0.0 && hit.normal.z < 0.0);
    }

    #[test]
    fn test_bounding_sphere_miss_skips_faces() {
        let mesh = load(TRIANGLE_OBJ, Vec3::ZERO, 1.0).unwrap();

        // Near the right-angle corner: inside the triangle but outside the
        // bounding sphere (center (1, 1), radius 1)
        let ray = Ray::new(Vec3::new(0.1, 0.1, 0.0), Vec3::Z);
        let [i0, i1, i2] = mesh.faces[0];
        let [p0, p1, p2] = [mesh.positions[i0], mesh.positions[i1], mesh.positions[i2]];
        assert!(moller_trumbore(&ray, p0, p1, p2).is_some());
        assert!(mesh.bounding_sphere().intersect(&ray).is_none());

        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    fn test_nearest_face_wins() {
        let obj = "\
v 0 0 -8
v 2 0 -8
v 0 2 -8
v 0 0 -4
v 2 0 -4
v 0 2 -4
f 1 2 3
f 4 5 6
";
        let mesh = load(obj, Vec3::ZERO, 1.0).unwrap();
        let hit = mesh
            .intersect(&Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::Z))
            .expect("should hit");

        assert!((hit.position.z - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_generated_normals_face_the_reversed_winding() {
        let obj = "v 0 0 -5\nv 2 0 -5\nv 0 2 -5\nf 1 2 3\n";
        let mesh = load(obj, Vec3::ZERO, 1.0).unwrap();

        // Counter-clockwise in the file (normal +Z), so after the conversion
        // the normal points back at the camera
        for normal in &mesh.normals {
            assert!((*normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
        }
    }

    #[test]
    fn test_out_of_range_vertex() {
        let err = load("v 0 0 0\nv 1 0 0\nf 1 2 3\n", Vec3::ZERO, 1.0).err().unwrap();

        match err {
            MeshError::IndexOutOfRange { face, kind, index, count } => {
                assert_eq!((face, kind, index, count), (0, "vertex", 3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_normal() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\n";
        let err = load(obj, Vec3::ZERO, 1.0).err().unwrap();

        assert!(matches!(err, MeshError::IndexOutOfRange { kind: "normal", .. }));
    }

    #[test]
    fn test_parse_error_is_fatal() {
        let err = load("v 0 0 zero\n", Vec3::ZERO, 1.0).err().unwrap();
        assert!(matches!(err, MeshError::Obj(ObjError::InvalidNumber { .. })));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = Mesh::load("/no/such/model.obj", Vec3::ZERO, 1.0, Material::default());
        assert!(matches!(result, Err(MeshError::Obj(ObjError::Io(_)))));
    }

    #[test]
    fn test_empty_mesh_never_hits() {
        let mesh = load("# nothing here\n", Vec3::ZERO, 1.0).unwrap();
        assert!(mesh.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }
}
