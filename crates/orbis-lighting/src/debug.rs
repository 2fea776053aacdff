//! Shadow-map debug rendering.

use orbis_terrain::debug_viz::DebugImage;

use crate::normals::NormalGrid;
use crate::shading::ShadowGrid;

/// Render the shadow map as greyscale. Cells facing away from the viewer
/// are left transparent.
pub fn render_shadow(shadows: &ShadowGrid, normals: &NormalGrid) -> DebugImage {
    let res = shadows.resolution();
    let mut image = DebugImage::new(res as u32, res as u32);
    for y in 0..res {
        for x in 0..res {
            let visible = normals.get(x, y).is_some_and(|n| n.faces_viewer());
            if !visible {
                continue;
            }
            let v = (shadows.get(x, y).unwrap_or(0.0) * 255.0).round() as u8;
            image.set_pixel(x as u32, y as u32, [v, v, v, 255]);
        }
    }
    image
}
