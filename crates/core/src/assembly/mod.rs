//! Construction of the static geometry: wall, room shell and the framed
//! picture.

use glam::Vec3;

use crate::{
    assets::{Texture, TextureFilter},
    config::{FrameConfig, WallConfig},
    layout::{FrameBoundingBox, FrameLayout},
    scene::{Geometry, Material, Mesh, Scene, Side},
};

pub const WALL: &str = "wall";
pub const ROOM: &str = "room";
pub const PICTURE: &str = "picture";
pub const BOARD: &str = "board";
pub const BORDER_LEFT: &str = "border-left";
pub const BORDER_RIGHT: &str = "border-right";
pub const BORDER_TOP: &str = "border-top";
pub const BORDER_BOTTOM: &str = "border-bottom";

/// Adds the wall plane and the double-sided box that encloses the scene.
pub fn add_wall(scene: &mut Scene, config: &WallConfig) {
    let s = config.size;

    scene.add_mesh(
        Mesh::new(
            WALL,
            Geometry::Plane {
                width: s,
                height: s,
            },
            Material::phong(config.color),
        )
        .shadows(true, true),
    );

    scene.add_mesh(
        Mesh::new(
            ROOM,
            Geometry::Box {
                width: s,
                height: s,
                depth: s,
            },
            Material::phong(config.color).with_side(Side::Double),
        )
        .shadows(false, true),
    );
}

/// Adds the picture, its white board and the four border strips, all centred
/// on the origin. Returns the border-inclusive bounding box.
pub fn add_frame(scene: &mut Scene, mut texture: Texture, config: &FrameConfig) -> FrameBoundingBox {
    texture.min_filter = TextureFilter::LinearMipmapLinear;

    let layout = FrameLayout::from_pixels(texture.width, texture.height, config.border_width);
    let fw = layout.dimensions.width;
    let fh = layout.dimensions.height;
    let bw = config.border_width;
    let border_depth = config.border_depth();

    tracing::debug!(
        frame_width = fw,
        frame_height = fh,
        bbox_width = layout.bounding_box.width,
        bbox_height = layout.bounding_box.height,
        "frame layout computed"
    );

    // Sits on the board's front face; the polygon offset wins the depth tie.
    scene.add_mesh(
        Mesh::new(
            PICTURE,
            Geometry::Plane {
                width: fw * config.picture_scale,
                height: fh * config.picture_scale,
            },
            Material::textured(texture).with_polygon_offset(0.0, config.picture_polygon_offset_units),
        )
        .at(Vec3::new(0.0, 0.0, config.frame_depth / 2.0))
        .shadows(false, true),
    );

    scene.add_mesh(
        Mesh::new(
            BOARD,
            Geometry::Box {
                width: fw,
                height: fh,
                depth: config.frame_depth,
            },
            Material::phong(config.board_color),
        )
        .shadows(false, true),
    );

    let side = Geometry::Box {
        width: bw,
        height: fh,
        depth: border_depth,
    };
    let span = Geometry::Box {
        width: fw + bw * 2.0,
        height: bw,
        depth: border_depth,
    };
    let x = fw / 2.0 + bw / 2.0;
    let y = fh / 2.0 + bw / 2.0;

    let borders = [
        (BORDER_RIGHT, side, Vec3::new(x, 0.0, 0.0)),
        (BORDER_LEFT, side, Vec3::new(-x, 0.0, 0.0)),
        (BORDER_TOP, span, Vec3::new(0.0, y, 0.0)),
        (BORDER_BOTTOM, span, Vec3::new(0.0, -y, 0.0)),
    ];
    for (name, geometry, position) in borders {
        scene.add_mesh(
            Mesh::new(name, geometry, Material::phong(config.border_color))
                .at(position)
                .shadows(true, true),
        );
    }

    layout.bounding_box
}
