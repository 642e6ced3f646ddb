//! MJCF body/geom reader

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::include::read_with_includes;
use super::{ImportError, ImportedBody, ImportedGeom, ImportedModel};

/// Read an MJCF file, expanding includes first
pub fn read_mjcf(path: &Path) -> Result<ImportedModel, ImportError> {
    let xml = read_with_includes(path)?;
    parse_mjcf_str(&xml)
}

/// Collect every body and its direct geom children, document order
pub fn parse_mjcf_str(xml: &str) -> Result<ImportedModel, ImportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut model = ImportedModel::default();
    // One entry per open element; bodies carry their index in `model.bodies`
    let mut open: Vec<Option<usize>> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| ImportError::Xml(e.to_string()))?;
        match event {
            Event::Start(ref e) => {
                let body = handle_element(&mut model, open.last().copied().flatten(), e)?;
                open.push(body);
            }
            Event::Empty(ref e) => {
                handle_element(&mut model, open.last().copied().flatten(), e)?;
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!("Read {} bodies from MJCF", model.bodies.len());
    Ok(model)
}

/// Record a body or geom; returns the new body's index for bodies
fn handle_element(
    model: &mut ImportedModel,
    parent_body: Option<usize>,
    e: &BytesStart,
) -> Result<Option<usize>, ImportError> {
    match e.name().as_ref() {
        b"body" => {
            let name = attribute(e, "name")?
                .unwrap_or_else(|| format!("body{}", model.bodies.len()));
            model.bodies.push(ImportedBody {
                name,
                geoms: Vec::new(),
            });
            Ok(Some(model.bodies.len() - 1))
        }
        b"geom" => {
            if let Some(index) = parent_body {
                let size = match attribute(e, "size")? {
                    Some(text) => parse_values(&text)?,
                    None => Vec::new(),
                };
                model.bodies[index].geoms.push(ImportedGeom {
                    name: attribute(e, "name")?,
                    size,
                });
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, ImportError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| ImportError::Xml(format!("invalid '{name}' attribute: {err}")))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn parse_values(text: &str) -> Result<Vec<f64>, ImportError> {
    text.split_whitespace()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| ImportError::Xml(format!("invalid number '{v}' in size")))
        })
        .collect()
}
