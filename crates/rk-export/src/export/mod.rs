//! Document writer
//!
//! One document is written per export root (an un-parented link). A failure
//! in one root's tree is recorded and the remaining roots are still
//! exported; only fatal errors stop the run.

mod options;

pub use options::*;

use std::fs;
use std::path::{Path, PathBuf};

use rk_scene::{ExportKind, Scene, SceneObject};

use crate::assets::AssetRegistry;
use crate::classify::exports_mesh;
use crate::error::ExportError;
use crate::joint::ActuatorSpec;
use crate::mesh::{MeshExporter, ObjMeshExporter};
use crate::target::DocumentContext;
use crate::tree::TreeWalker;
use crate::xml::XmlElement;

/// A built document for one root
#[derive(Debug, Clone)]
pub struct Document {
    pub root_name: String,
    pub file_name: String,
    pub element: XmlElement,
    pub declaration: bool,
    pub warnings: Vec<String>,
}

impl Document {
    pub fn to_xml_string(&self) -> Result<String, ExportError> {
        self.element.to_xml_string(self.declaration)
    }

    /// Serialize into `dir`, returning the written path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        let xml = self.to_xml_string()?;
        fs::write(&path, xml).map_err(|e| ExportError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}

/// A root whose document could not be built or written
#[derive(Debug, Clone)]
pub struct RootFailure {
    pub root: String,
    pub error: ExportError,
}

/// Outcome of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub documents: Vec<PathBuf>,
    pub failures: Vec<RootFailure>,
    pub meshes: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl ExportSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Un-parented link objects, in scene order
pub fn export_roots(scene: &Scene) -> Vec<&SceneObject> {
    scene
        .roots()
        .into_iter()
        .filter(|o| o.annotation.kind == ExportKind::Link)
        .collect()
}

/// Build the document for one root without writing it
pub fn build_document(
    scene: &Scene,
    options: &ExportOptions,
    root: &SceneObject,
) -> Result<Document, ExportError> {
    let target = options.format.target();
    let assets = AssetRegistry::build(scene, options);
    let walk = TreeWalker::new(scene, &assets, options.angle_conversion).walk(root)?;

    let actuators: Vec<&ActuatorSpec> = assets
        .actuators
        .iter()
        .filter(|actuator| walk.joint_objects.contains(&actuator.object))
        .collect();
    tracing::debug!(
        "Root '{}' keeps {} of {} actuators",
        root.name,
        actuators.len(),
        assets.actuators.len()
    );

    let model_name = options.model_name_for(&root.name);
    let ctx = DocumentContext {
        scene,
        options,
        root,
        model_name: &model_name,
        assets: &assets,
        tree: &walk.root,
        materials: &walk.materials,
        actuators: &actuators,
    };
    let element = target.build_document(&ctx)?;

    tracing::debug!("Built {} document for '{}'", target.name(), root.name);
    Ok(Document {
        root_name: root.name.clone(),
        file_name: format!("{}.{}", root.name, target.extension()),
        element,
        declaration: target.xml_declaration(),
        warnings: assets.warnings.clone(),
    })
}

/// Render one named root to a string
pub fn export_to_string(
    scene: &Scene,
    options: &ExportOptions,
    root_name: &str,
) -> Result<String, ExportError> {
    scene.validate()?;
    let root = scene
        .object_by_name(root_name)
        .ok_or_else(|| ExportError::RootNotFound(root_name.to_string()))?;
    build_document(scene, options, root)?.to_xml_string()
}

/// Export every root, writing OBJ mesh files when enabled
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> Result<ExportSummary, ExportError> {
    export_scene_with(scene, options, &ObjMeshExporter)
}

/// Export every root with a custom mesh exporter
pub fn export_scene_with(
    scene: &Scene,
    options: &ExportOptions,
    mesh_exporter: &dyn MeshExporter,
) -> Result<ExportSummary, ExportError> {
    scene.validate()?;
    fs::create_dir_all(&options.output_dir).map_err(|e| ExportError::OutputDir {
        path: options.output_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut summary = ExportSummary::default();
    let roots = export_roots(scene);
    if roots.is_empty() {
        let warning = "Scene has no un-parented link objects to export".to_string();
        tracing::warn!("{}", warning);
        summary.warnings.push(warning);
    }

    for root in roots {
        let result = build_document(scene, options, root)
            .and_then(|doc| doc.write_to(&options.output_dir).map(|path| (doc, path)));
        match result {
            Ok((doc, path)) => {
                tracing::info!("Exported '{}' to {:?}", root.name, path);
                summary.documents.push(path);
                for warning in doc.warnings {
                    if !summary.warnings.contains(&warning) {
                        summary.warnings.push(warning);
                    }
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!("Export of '{}' failed: {}", root.name, e);
                summary.failures.push(RootFailure {
                    root: root.name.clone(),
                    error: e,
                });
            }
        }
    }

    if options.export_meshes {
        for object in scene.objects().iter().filter(|o| exports_mesh(o)) {
            let path = options.mesh_path(&object.name);
            match mesh_exporter.export_mesh(object, &path) {
                Ok(()) => summary.meshes.push(path),
                Err(e) => {
                    tracing::warn!("{}", e);
                    summary.warnings.push(e.to_string());
                }
            }
        }
    }

    tracing::info!(
        "Export finished: {} documents, {} failures, {} meshes",
        summary.documents.len(),
        summary.failures.len(),
        summary.meshes.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_scene::{Annotation, JointAnnotation, JointAxis, JointKind};

    fn two_roots() -> Scene {
        let mut scene = Scene::new();
        let a = scene
            .add_object(SceneObject::empty("a").with_annotation(Annotation::link()))
            .unwrap();
        scene
            .add_child(
                a,
                SceneObject::empty("a_arm").with_annotation(
                    Annotation::link().with_joint(JointAnnotation::new(JointKind::Hinge, JointAxis::X)),
                ),
            )
            .unwrap();
        scene
            .add_object(SceneObject::empty("b").with_annotation(Annotation::link()))
            .unwrap();
        scene.add_object(SceneObject::empty("loose")).unwrap();
        scene
    }

    #[test]
    fn test_roots_are_unparented_links() {
        let scene = two_roots();
        let names: Vec<&str> = export_roots(&scene).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_actuators_scoped_to_tree() {
        let scene = two_roots();
        let options = ExportOptions::default();

        let a = build_document(&scene, &options, scene.object_by_name("a").unwrap()).unwrap();
        let b = build_document(&scene, &options, scene.object_by_name("b").unwrap()).unwrap();

        assert_eq!(a.element.find("actuator").unwrap().children.len(), 1);
        assert!(b.element.find("actuator").unwrap().children.is_empty());
        assert!(a.warnings.is_empty() && b.warnings.is_empty());
    }

    #[test]
    fn test_shared_joint_name_stays_in_own_tree() {
        let mut scene = Scene::new();
        for root in ["a", "b"] {
            let id = scene
                .add_object(SceneObject::empty(root).with_annotation(Annotation::link()))
                .unwrap();
            scene
                .add_child(
                    id,
                    SceneObject::empty(format!("{root}_arm")).with_annotation(Annotation::link().with_joint(
                        JointAnnotation::new(JointKind::Hinge, JointAxis::X).with_name("elbow"),
                    )),
                )
                .unwrap();
        }
        let options = ExportOptions::default();

        for root in ["a", "b"] {
            let doc = build_document(&scene, &options, scene.object_by_name(root).unwrap()).unwrap();
            let names: Vec<&str> = doc
                .element
                .find("actuator")
                .unwrap()
                .children
                .iter()
                .filter_map(|p| p.get("name"))
                .collect();
            assert_eq!(names, vec![format!("{root}_arm")]);
        }
    }

    #[test]
    fn test_model_name_defaults_to_output_dir() {
        let scene = two_roots();
        let options = ExportOptions::new("/tmp/robots");
        let doc = build_document(&scene, &options, scene.object_by_name("a").unwrap()).unwrap();

        assert_eq!(doc.element.get("model"), Some("robots"));
    }

    #[test]
    fn test_model_name_override() {
        let scene = two_roots();
        let options = ExportOptions::default().with_model_name("robot");
        let doc = build_document(&scene, &options, scene.object_by_name("a").unwrap()).unwrap();

        assert_eq!(doc.element.get("model"), Some("robot"));
        assert_eq!(doc.file_name, "a.xml");
    }

    #[test]
    fn test_unknown_root() {
        let err = export_to_string(&two_roots(), &ExportOptions::default(), "nope").unwrap_err();
        assert!(matches!(err, ExportError::RootNotFound(_)));
    }
}
