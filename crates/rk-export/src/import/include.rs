//! `<include file="..."/>` expansion

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::ImportError;

/// Read a model file and splice in every included file
///
/// Includes resolve against the directory of `path` and may nest. Each file
/// is spliced at most once; later includes of the same file are dropped,
/// which also breaks include cycles.
pub fn read_with_includes(path: &Path) -> Result<String, ImportError> {
    let xml = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let base_dir = path.parent().unwrap_or(Path::new("."));

    let mut seen = HashSet::new();
    if let Ok(canonical) = path.canonicalize() {
        seen.insert(canonical);
    }
    expand(&xml, base_dir, &mut seen)
}

/// Expand includes in an in-memory document
pub fn expand_includes(xml: &str, base_dir: &Path) -> Result<String, ImportError> {
    let mut seen = HashSet::new();
    expand(xml, base_dir, &mut seen)
}

fn expand(xml: &str, base_dir: &Path, seen: &mut HashSet<PathBuf>) -> Result<String, ImportError> {
    if !xml.contains("<include") {
        return Ok(xml.to_string());
    }

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    loop {
        let event = reader.read_event().map_err(|e| ImportError::Xml(e.to_string()))?;
        match event {
            Event::Empty(ref e) if e.name().as_ref() == b"include" => {
                splice(&mut writer, e, base_dir, seen)?;
            }
            Event::Start(ref e) if e.name().as_ref() == b"include" => {
                splice(&mut writer, e, base_dir, seen)?;
                reader
                    .read_to_end(e.name())
                    .map_err(|e| ImportError::Xml(e.to_string()))?;
            }
            Event::Eof => break,
            event => {
                writer
                    .write_event(event)
                    .map_err(|e| ImportError::Xml(format!("write error: {e}")))?;
            }
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| ImportError::Xml(format!("UTF-8 error: {e}")))
}

fn splice(
    writer: &mut Writer<Vec<u8>>,
    include: &BytesStart,
    base_dir: &Path,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), ImportError> {
    let file = include_file(include)?;
    let path = base_dir.join(&file);
    let canonical = path.canonicalize().map_err(|e| {
        ImportError::Include(format!("cannot resolve '{}': {e}", path.display()))
    })?;
    if !seen.insert(canonical) {
        tracing::debug!("Skipping repeated include of {:?}", path);
        return Ok(());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let children = root_children(&content, &path)?;
    let nested_dir = path.parent().unwrap_or(base_dir);
    let expanded = expand(&children, nested_dir, seen)?;

    writer
        .write_event(Event::Text(BytesText::from_escaped(expanded.as_str())))
        .map_err(|e| ImportError::Xml(format!("write error: {e}")))?;
    Ok(())
}

fn include_file(include: &BytesStart) -> Result<String, ImportError> {
    for attr in include.attributes().flatten() {
        if attr.key.as_ref() == b"file" {
            let value = attr
                .unescape_value()
                .map_err(|e| ImportError::Xml(format!("invalid include file attribute: {e}")))?;
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }
    Err(ImportError::Include("<include> without a file attribute".to_string()))
}

/// Raw XML between the root element's start and end tags
fn root_children(xml: &str, source: &Path) -> Result<String, ImportError> {
    let mut reader = Reader::from_str(xml);
    let xml_error = |e: quick_xml::Error| ImportError::Xml(format!("{}: {e}", source.display()));

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(_) => break,
            Event::Empty(_) => return Ok(String::new()),
            Event::Eof => {
                return Err(ImportError::Include(format!(
                    "{} has no root element",
                    source.display()
                )));
            }
            _ => {}
        }
    }

    let mut writer = Writer::new(Vec::new());
    let mut depth = 1;
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                return Err(ImportError::Xml(format!(
                    "{}: unexpected end of file",
                    source.display()
                )));
            }
            _ => {}
        }
        writer
            .write_event(event)
            .map_err(|e| ImportError::Xml(format!("write error: {e}")))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| ImportError::Xml(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_splices_root_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("arm.xml"),
            r#"<mujocoinclude><body name="arm"><geom name="g"/></body></mujocoinclude>"#,
        )
        .unwrap();

        let xml = r#"<mujoco><worldbody><include file="arm.xml"/></worldbody></mujoco>"#;
        let out = expand_includes(xml, dir.path()).unwrap();

        assert!(out.contains(r#"<worldbody><body name="arm"><geom name="g"/></body></worldbody>"#));
        assert!(!out.contains("include"));
    }

    #[test]
    fn test_nested_and_repeated_includes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.xml"),
            r#"<x><body name="a"/><include file="b.xml"/></x>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.xml"),
            r#"<x><body name="b"/><include file="a.xml"/></x>"#,
        )
        .unwrap();

        let xml = r#"<mujoco><include file="a.xml"/><include file="a.xml"/></mujoco>"#;
        let out = expand_includes(xml, dir.path()).unwrap();

        assert_eq!(out.matches(r#"name="a""#).count(), 1);
        assert_eq!(out.matches(r#"name="b""#).count(), 1);
    }

    #[test]
    fn test_missing_include_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let xml = r#"<mujoco><include file="nope.xml"/></mujoco>"#;

        assert!(matches!(
            expand_includes(xml, dir.path()),
            Err(ImportError::Include(_))
        ));
    }

    #[test]
    fn test_reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("parts.xml"), r#"<x><body name="p"/></x>"#).unwrap();
        let main = dir.path().join("main.xml");
        fs::write(&main, r#"<mujoco><include file="parts.xml"/></mujoco>"#).unwrap();

        let out = read_with_includes(&main).unwrap();
        assert!(out.contains(r#"<body name="p"/>"#));
    }
}
