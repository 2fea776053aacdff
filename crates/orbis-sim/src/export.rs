//! PNG export of every body's lit texture, elevation and shadow map.

use std::path::Path;

use orbis_body::{CelestialBody, StarSystem};
use orbis_lighting::render_shadow;
use orbis_terrain::debug_viz::{DebugImage, render_elevation, render_surface};
use tracing::info;

use crate::error::SimError;

const FILES_PER_BODY: usize = 3;

/// Lowercase file stem with everything but ASCII alphanumerics replaced by `_`.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn write_png(image: &DebugImage, path: &Path) -> Result<(), SimError> {
    let bytes = image.encode_png()?;
    std::fs::write(path, bytes).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn export_body(body: &CelestialBody, dir: &Path) -> Result<(), SimError> {
    let stem = file_stem(body.name());
    write_png(&render_surface(body.surface()), &dir.join(format!("{stem}_surface.png")))?;
    write_png(&render_elevation(body.surface()), &dir.join(format!("{stem}_elevation.png")))?;
    write_png(
        &render_shadow(body.shadows(), body.normals()),
        &dir.join(format!("{stem}_shadow.png")),
    )
}

/// Write `<name>_surface.png`, `<name>_elevation.png` and `<name>_shadow.png`
/// for every body into `dir`, creating it if needed. Returns the number of
/// files written.
pub fn export_system(system: &StarSystem, dir: &Path) -> Result<usize, SimError> {
    std::fs::create_dir_all(dir).map_err(|source| SimError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = 0;
    for (_, body) in system.bodies() {
        export_body(body, dir)?;
        written += FILES_PER_BODY;
    }
    info!(files = written, dir = %dir.display(), "exported textures");
    Ok(written)
}
