//! URDF reader backed by `urdf-rs`

use std::path::Path;

use super::{ImportError, ImportedBody, ImportedGeom, ImportedModel};

pub fn read_urdf(path: &Path) -> Result<ImportedModel, ImportError> {
    let robot = urdf_rs::read_file(path).map_err(|e| ImportError::Urdf(e.to_string()))?;
    Ok(convert_robot(&robot))
}

pub fn parse_urdf_str(xml: &str) -> Result<ImportedModel, ImportError> {
    let robot = urdf_rs::read_from_string(xml).map_err(|e| ImportError::Urdf(e.to_string()))?;
    Ok(convert_robot(&robot))
}

/// Links become bodies; named visual and collision shapes become geoms
fn convert_robot(robot: &urdf_rs::Robot) -> ImportedModel {
    let bodies = robot
        .links
        .iter()
        .map(|link| {
            let mut geoms: Vec<ImportedGeom> = Vec::new();
            let shapes = link
                .visual
                .iter()
                .map(|v| (&v.name, &v.geometry))
                .chain(link.collision.iter().map(|c| (&c.name, &c.geometry)));
            for (name, geometry) in shapes {
                if name.is_some() && geoms.iter().any(|g| g.name == *name) {
                    continue;
                }
                geoms.push(ImportedGeom {
                    name: name.clone(),
                    size: geometry_size(geometry),
                });
            }
            ImportedBody {
                name: link.name.clone(),
                geoms,
            }
        })
        .collect();

    tracing::debug!("Read URDF robot '{}' with {} links", robot.name, robot.links.len());
    ImportedModel { bodies }
}

/// Geometry dimensions in MJCF size convention (half-extents, half-length)
fn geometry_size(geometry: &urdf_rs::Geometry) -> Vec<f64> {
    match geometry {
        urdf_rs::Geometry::Box { size } => size.0.iter().map(|v| v / 2.0).collect(),
        urdf_rs::Geometry::Cylinder { radius, length }
        | urdf_rs::Geometry::Capsule { radius, length } => vec![*radius, length / 2.0],
        urdf_rs::Geometry::Sphere { radius } => vec![*radius],
        urdf_rs::Geometry::Mesh { scale, .. } => scale.as_ref().map(|s| s.0.to_vec()).unwrap_or_default(),
    }
}
