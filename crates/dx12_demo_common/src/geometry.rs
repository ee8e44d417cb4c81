/// Vertex layout of the colored triangle: `POSITION` then `COLOR`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Vertex layout of the textured quad: `POSITION` then `TEXCOORD`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

pub const TRIANGLE_VERTICES: [ColorVertex; 3] = [
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: RED,
    },
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: GREEN,
    },
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: BLUE,
    },
];

// Two triangles, clockwise, uv origin at the top left.
pub const QUAD_VERTICES: [TexturedVertex; 6] = [
    TexturedVertex {
        position: [-0.5, -0.5],
        uv: [0.0, 1.0],
    },
    TexturedVertex {
        position: [-0.5, 0.5],
        uv: [0.0, 0.0],
    },
    TexturedVertex {
        position: [0.5, 0.5],
        uv: [1.0, 0.0],
    },
    TexturedVertex {
        position: [0.5, 0.5],
        uv: [1.0, 0.0],
    },
    TexturedVertex {
        position: [0.5, -0.5],
        uv: [1.0, 1.0],
    },
    TexturedVertex {
        position: [-0.5, -0.5],
        uv: [0.0, 1.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;
    use std::mem::size_of;

    /// Twice the signed area in clip space (y up). Negative means clockwise.
    fn signed_area(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    #[test]
    fn strides_match_the_input_layouts() {
        assert_eq!(size_of::<ColorVertex>(), 28);
        assert_eq!(offset_of!(ColorVertex, color), 12);
        assert_eq!(size_of::<TexturedVertex>(), 16);
        assert_eq!(offset_of!(TexturedVertex, uv), 8);
    }

    #[test]
    fn triangle_faces_the_camera() {
        let [a, b, c] = TRIANGLE_VERTICES.map(|v| [v.position[0], v.position[1]]);
        assert!(signed_area(a, b, c) < 0.0);
    }

    #[test]
    fn quad_triangles_face_the_camera_and_cover_the_square() {
        for tri in QUAD_VERTICES.chunks(3) {
            assert!(signed_area(tri[0].position, tri[1].position, tri[2].position) < 0.0);
        }
        let total: f32 = QUAD_VERTICES
            .chunks(3)
            .map(|t| signed_area(t[0].position, t[1].position, t[2].position).abs() / 2.0)
            .sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quad_uvs_flip_v_against_clip_space_y() {
        for vertex in QUAD_VERTICES {
            assert_eq!(vertex.uv[0], vertex.position[0] + 0.5);
            assert_eq!(vertex.uv[1], 0.5 - vertex.position[1]);
        }
    }
}
