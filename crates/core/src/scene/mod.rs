//! Retained-mode scene graph consumed by the renderer.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;

/// 24-bit RGB colour stored as `0xRRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Single-segment plane in the XY plane facing +z.
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Depth bias: `offset = slope * factor + epsilon * units`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolygonOffset {
    pub factor: f32,
    pub units: f32,
}

/// Phong-style surface description.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub color: Color,
    pub map: Option<Texture>,
    pub side: Side,
    pub polygon_offset: Option<PolygonOffset>,
}

impl Material {
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            map: None,
            side: Side::Front,
            polygon_offset: None,
        }
    }

    pub fn textured(map: Texture) -> Self {
        Self {
            map: Some(map),
            ..Self::phong(Color::WHITE)
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_polygon_offset(mut self, factor: f32, units: f32) -> Self {
        self.polygon_offset = Some(PolygonOffset { factor, units });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            position: Vec3::ZERO,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    /// Zero means the light has unlimited range.
    pub distance: f32,
    pub decay: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
    /// Shadow map resolution as `(width, height)` texels.
    pub shadow_map_size: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient(AmbientLight),
    Spot(SpotLight),
}

impl Light {
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Light::Ambient(_) => None,
            Light::Spot(spot) => Some(spot.position),
        }
    }

    pub fn position_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            Light::Ambient(_) => None,
            Light::Spot(spot) => Some(&mut spot.position),
        }
    }

    pub fn casts_shadow(&self) -> bool {
        matches!(self, Light::Spot(spot) if spot.cast_shadow)
    }
}

/// Stable handle to a light inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(usize);

/// Flat scene container. Nodes are only ever added, so light handles stay
/// valid for the lifetime of the scene. Meshes are looked up by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        tracing::trace!(name = %mesh.name, position = ?mesh.position, "mesh added");
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        let id = LightId(self.lights.len());
        self.lights.push(light);
        id
    }

    pub fn mesh_by_name(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Positions of every positioned light, in insertion order.
    pub fn light_positions(&self) -> Vec<Vec3> {
        self.lights.iter().filter_map(Light::position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot_at(x: f32) -> Light {
        Light::Spot(SpotLight {
            color: Color(0xff00ff),
            intensity: 5.0,
            distance: 14.0,
            decay: 2.0,
            angle: 0.1,
            penumbra: 1.0,
            position: Vec3::new(x, 1.0, 2.0),
            cast_shadow: true,
            shadow_map_size: (1024, 1024),
        })
    }

    #[test]
    fn color_debug_is_hex() {
        assert_eq!(format!("{:?}", Color(0xaa6666)), "#aa6666");
    }

    #[test]
    fn handles_address_their_own_nodes() {
        let mut scene = Scene::new();
        let ambient = scene.add_light(Light::Ambient(AmbientLight {
            color: Color::WHITE,
            intensity: 0.3,
        }));
        let spot = scene.add_light(spot_at(1.5));
        scene.add_mesh(Mesh::new(
            "wall",
            Geometry::Plane {
                width: 100.0,
                height: 100.0,
            },
            Material::phong(Color(0xaa6666)),
        ));

        assert!(scene.light(ambient).unwrap().position().is_none());
        assert_eq!(scene.light(spot).unwrap().position().unwrap().x, 1.5);
        assert_eq!(scene.mesh_by_name("wall").unwrap().material.color, Color(0xaa6666));
        assert!(scene.mesh_by_name("room").is_none());
        assert_eq!(scene.light_positions().len(), 1);
    }

    #[test]
    fn light_position_is_mutable_through_handle() {
        let mut scene = Scene::new();
        let id = scene.add_light(spot_at(0.0));

        if let Some(position) = scene.light_mut(id).and_then(Light::position_mut) {
            position.x = -3.0;
        }

        assert_eq!(scene.light(id).unwrap().position().unwrap().x, -3.0);
        assert!(scene.light(id).unwrap().casts_shadow());
    }

    #[test]
    fn mesh_builders_set_transform_and_shadows() {
        let mesh = Mesh::new(
            "border-left",
            Geometry::Box {
                width: 0.05,
                height: 1.0,
                depth: 0.04,
            },
            Material::phong(Color(0x222222)).with_side(Side::Double),
        )
        .at(Vec3::new(-0.525, 0.0, 0.0))
        .shadows(true, false);

        assert_eq!(mesh.position.x, -0.525);
        assert!(mesh.cast_shadow);
        assert!(!mesh.receive_shadow);
        assert_eq!(mesh.material.side, Side::Double);
    }
}
