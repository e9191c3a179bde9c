use glam::Vec3;
use shape_scene::geometry::{box_mesh, sphere_mesh, torus_knot_mesh, torus_mesh, wobble_position, MeshData};

fn assert_indices_in_range(mesh: &MeshData, label: &str) {
    let count = mesh.vertices.len() as u32;
    assert!(
        mesh.indices.iter().all(|&i| i < count),
        "{}: index out of range for {} vertices",
        label,
        count
    );
    assert_eq!(mesh.indices.len() % 3, 0, "{}: indices must form triangles", label);
}

fn assert_unit_normals(mesh: &MeshData, label: &str) {
    for (i, v) in mesh.vertices.iter().enumerate() {
        let length = Vec3::from_array(v.normal).length();
        assert!((length - 1.0).abs() < 1e-4, "{}: normal {} has length {}", label, i, length);
    }
}

#[cfg(test)]
mod vertex_count_tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let mesh = box_mesh(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_in_range(&mesh, "box");
        assert_unit_normals(&mesh, "box");
    }

    #[test]
    fn test_sphere_counts() {
        for (ws, hs) in [(3, 2), (8, 6), (30, 30)] {
            let mesh = sphere_mesh(1.0, ws, hs);
            assert_eq!(mesh.vertices.len(), ((ws + 1) * (hs + 1)) as usize);
            // Pole rows emit one triangle per quad
            assert_eq!(mesh.indices.len(), (6 * ws * (hs - 1)) as usize);
            assert_indices_in_range(&mesh, "sphere");
        }
    }

    #[test]
    fn test_sphere_segments_clamped_to_minimum() {
        let mesh = sphere_mesh(1.0, 1, 1);
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }

    #[test]
    fn test_torus_counts() {
        let mesh = torus_mesh(0.8, 0.1, 30, 30);
        assert_eq!(mesh.vertices.len(), 31 * 31);
        assert_eq!(mesh.indices.len(), 6 * 30 * 30);
        assert_indices_in_range(&mesh, "torus");
        assert_unit_normals(&mesh, "torus");
    }

    #[test]
    fn test_torus_knot_counts() {
        let mesh = torus_knot_mesh(5.0, 0.1, 1000, 50, 2, 3);
        assert_eq!(mesh.vertices.len(), 1001 * 51);
        assert_eq!(mesh.indices.len(), 6 * 1000 * 50);
        assert_indices_in_range(&mesh, "torus knot");
        assert_unit_normals(&mesh, "torus knot");
    }

    #[test]
    fn test_torus_knot_segments_clamped() {
        let mesh = torus_knot_mesh(1.0, 0.1, 0, 0, 2, 3);
        assert_eq!(mesh.vertices.len(), 4 * 4);
        assert_eq!(mesh.indices.len(), 6 * 3 * 3);
    }
}

#[cfg(test)]
mod shape_tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = sphere_mesh(2.5, 16, 12);
        for v in &mesh.vertices {
            let length = Vec3::from_array(v.position).length();
            assert!((length - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_box_bounds_match_dimensions() {
        let bounds = box_mesh(1.0, 2.0, 3.0).bounds();
        assert_eq!(bounds.min, Vec3::new(-0.5, -1.0, -1.5));
        assert_eq!(bounds.max, Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_torus_knot_stays_within_radius() {
        // Curve radius peaks at 3R/2, plus the tube
        let bounds = torus_knot_mesh(5.0, 0.1, 200, 8, 2, 3).bounds();
        let limit = 7.5 + 0.1 + 1e-3;
        assert!(bounds.min.cmpge(Vec3::splat(-limit)).all());
        assert!(bounds.max.cmple(Vec3::splat(limit)).all());
    }

    #[test]
    fn test_box_edges_are_deduplicated() {
        // 6 faces * 4 outline edges + 6 diagonals
        let edges = box_mesh(1.0, 1.0, 1.0).edge_indices();
        assert_eq!(edges.len(), 2 * 30);
    }

    #[test]
    fn test_wobble_preserves_height_and_xz_length() {
        let p = Vec3::new(1.0, 0.7, -2.0);
        for time in [0.0, 0.5, 2.0] {
            let w = wobble_position(p, time, 5.0);
            assert_eq!(w.y, p.y);
            let xz = (w.x * w.x + w.z * w.z).sqrt();
            assert!((xz - (p.x * p.x + p.z * p.z).sqrt()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wobble_without_factor_is_identity() {
        let p = Vec3::new(1.0, 0.7, -2.0);
        assert_eq!(wobble_position(p, 3.0, 0.0), p);
    }
}
