use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Indexed triangle list in object space.
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.vertices.push(Vertex::new(position, normal));
        (self.vertices.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat quad from four corners in counter-clockwise order.
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let [a, b, c, d] = corners.map(|corner| self.push_vertex(corner, normal));
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Triangle fan disc at height `y`, facing +Y or -Y.
    fn push_disc(&mut self, y: f32, radius: f32, segments: u32, facing_up: bool) {
        let normal = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let first = self.vertices.len() as u32;

        for i in 0..=segments {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            self.push_vertex(Vec3::new(cos * radius, y, sin * radius), normal);
        }

        for i in 0..segments {
            let (a, b) = (first + i, first + i + 1);
            if facing_up {
                self.push_triangle(center, b, a);
            } else {
                self.push_triangle(center, a, b);
            }
        }
    }

    /// Axis-aligned unit cube centered on the origin.
    pub fn cube() -> Self {
        let mut mesh = Mesh::new("Cube");
        let h = 0.5;

        // (normal, u, v) with u x v == normal, so corners wind counter-clockwise.
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::NEG_X, Vec3::Z),
            (Vec3::NEG_Y, Vec3::NEG_X, Vec3::NEG_Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        for (normal, u, v) in faces {
            let center = normal * h;
            mesh.push_quad(
                [
                    center - u * h - v * h,
                    center + u * h - v * h,
                    center + u * h + v * h,
                    center - u * h + v * h,
                ],
                normal,
            );
        }

        mesh
    }

    /// Unit square in the XZ plane facing +Y.
    pub fn plane() -> Self {
        let mut mesh = Mesh::new("Plane");
        let h = 0.5;

        mesh.push_quad(
            [
                Vec3::new(-h, 0.0, h),
                Vec3::new(h, 0.0, h),
                Vec3::new(h, 0.0, -h),
                Vec3::new(-h, 0.0, -h),
            ],
            Vec3::Y,
        );

        mesh
    }

    /// Radius 1, standing on y = 0 with height 1.
    pub fn cylinder(segments: u32) -> Self {
        let mut mesh = Mesh::new("Cylinder");
        let first = mesh.vertices.len() as u32;

        for i in 0..=segments {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            let normal = Vec3::new(cos, 0.0, sin);
            mesh.push_vertex(normal, normal);
            mesh.push_vertex(normal + Vec3::Y, normal);
        }

        for i in 0..segments {
            let bottom = first + i * 2;
            let (top, next_bottom, next_top) = (bottom + 1, bottom + 2, bottom + 3);
            mesh.push_triangle(bottom, top, next_top);
            mesh.push_triangle(bottom, next_top, next_bottom);
        }

        mesh.push_disc(0.0, 1.0, segments, false);
        mesh.push_disc(1.0, 1.0, segments, true);

        mesh
    }

    /// Base radius 1 on y = 0, apex at y = 1.
    pub fn cone(segments: u32) -> Self {
        let mut mesh = Mesh::new("Cone");
        let apex = Vec3::Y;

        for i in 0..segments {
            let angle_a = TAU * i as f32 / segments as f32;
            let angle_b = TAU * (i + 1) as f32 / segments as f32;
            let rim_a = Vec3::new(angle_a.cos(), 0.0, angle_a.sin());
            let rim_b = Vec3::new(angle_b.cos(), 0.0, angle_b.sin());

            // Slope normal: outward radial component tilted up by the 45 degree side.
            let normal_a = (rim_a + Vec3::Y).normalize();
            let normal_b = (rim_b + Vec3::Y).normalize();
            let normal_apex = (normal_a + normal_b).normalize();

            let a = mesh.push_vertex(rim_a, normal_a);
            let b = mesh.push_vertex(rim_b, normal_b);
            let c = mesh.push_vertex(apex, normal_apex);
            mesh.push_triangle(a, c, b);
        }

        mesh.push_disc(0.0, 1.0, segments, false);

        mesh
    }

    /// Square base of side 1 on y = 0, apex at y = 1.
    pub fn pyramid() -> Self {
        let mut mesh = Mesh::new("Pyramid");
        let h = 0.5;
        let apex = Vec3::Y;

        let base = [
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(-h, 0.0, -h),
        ];

        mesh.push_quad([base[3], base[2], base[1], base[0]], Vec3::NEG_Y);

        for i in 0..4 {
            let (a, b) = (base[i], base[(i + 1) % 4]);
            let normal = (b - a).cross(apex - a).normalize();
            let ia = mesh.push_vertex(a, normal);
            let ib = mesh.push_vertex(b, normal);
            let ic = mesh.push_vertex(apex, normal);
            mesh.push_triangle(ia, ib, ic);
        }

        mesh
    }

    /// UV sphere of radius 1 centered on the origin.
    pub fn sphere(stacks: u32, slices: u32) -> Self {
        let mut mesh = Mesh::new("Sphere");

        for stack in 0..=stacks {
            let phi = PI * stack as f32 / stacks as f32;
            let (ring_radius, y) = phi.sin_cos();

            for slice in 0..=slices {
                let (sin, cos) = (TAU * slice as f32 / slices as f32).sin_cos();
                let normal = Vec3::new(cos * ring_radius, y, sin * ring_radius);
                mesh.push_vertex(normal, normal);
            }
        }

        let row = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * row + slice;
                let b = a + row;
                mesh.push_triangle(a, a + 1, b);
                mesh.push_triangle(a + 1, b + 1, b);
            }
        }

        mesh
    }

    /// Torus lying in the XZ plane.
    pub fn torus(major_radius: f32, minor_radius: f32, rings: u32, sides: u32) -> Self {
        let mut mesh = Mesh::new("Torus");

        for ring in 0..=rings {
            let (ring_sin, ring_cos) = (TAU * ring as f32 / rings as f32).sin_cos();
            let ring_dir = Vec3::new(ring_cos, 0.0, ring_sin);
            let ring_center = ring_dir * major_radius;

            for side in 0..=sides {
                let (side_sin, side_cos) = (TAU * side as f32 / sides as f32).sin_cos();
                let normal = ring_dir * side_cos + Vec3::Y * side_sin;
                mesh.push_vertex(ring_center + normal * minor_radius, normal);
            }
        }

        let row = sides + 1;
        for ring in 0..rings {
            for side in 0..sides {
                let a = ring * row + side;
                let b = a + row;
                mesh.push_triangle(a, b, a + 1);
                mesh.push_triangle(a + 1, b, b + 1);
            }
        }

        mesh
    }
}
