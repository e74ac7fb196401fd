use anyhow::{Context, Result};
use parity_core::{AppCapture, DesignComponent, DesignDocument};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Component trees have no depth bound, so parsing grows the stack on
/// demand instead of stopping at serde_json's recursion limit.
fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("read {} {}", what, path.display()))?;
    let mut json = serde_json::Deserializer::from_slice(&bytes);
    json.disable_recursion_limit();
    let value: T = serde::Deserialize::deserialize(serde_stacker::Deserializer::new(&mut json))
        .with_context(|| format!("parse {} {}", what, path.display()))?;
    json.end().with_context(|| format!("trailing data in {} {}", what, path.display()))?;
    Ok(value)
}

/// Reads a normalized design export. Screens and components without a file
/// key inherit the document's.
pub fn load_design_document(path: &Path) -> Result<DesignDocument> {
    let mut doc: DesignDocument = read_json(path, "design document")?;
    if let Some(file_key) = doc.file_key.clone() {
        for screen in &mut doc.screens {
            if screen.trace_ref.file_key.is_empty() {
                screen.trace_ref.file_key = file_key.clone();
            }
            let mut stack: Vec<&mut DesignComponent> = screen.components.iter_mut().collect();
            while let Some(node) = stack.pop() {
                if node.trace_ref.file_key.is_empty() {
                    node.trace_ref.file_key = file_key.clone();
                }
                stack.extend(node.children.iter_mut());
            }
        }
    }
    tracing::debug!(path = %path.display(), screens = doc.screens.len(), "loaded design document");
    Ok(doc)
}

pub fn load_app_capture(path: &Path) -> Result<AppCapture> {
    let capture: AppCapture = read_json(path, "app capture")?;
    tracing::debug!(path = %path.display(), screens = capture.screens.len(), platform = capture.platform.as_str(), "loaded app capture");
    Ok(capture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn document_file_key_fills_missing_trace_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("design.json");
        std::fs::write(
            &path,
            r#"{
  "fileKey": "DOC",
  "screens": [{
    "traceRef": { "nodeId": "1:1" },
    "name": "Home", "width": 360, "height": 640,
    "components": [{
      "traceRef": { "nodeId": "1:2" },
      "type": "container",
      "children": [{ "traceRef": { "nodeId": "1:3", "fileKey": "OTHER" }, "type": "text" }]
    }]
  }]
}"#,
        )
        .unwrap();
        let doc = load_design_document(&path).unwrap();
        let screen = &doc.screens[0];
        assert_eq!(screen.trace_ref.file_key, "DOC");
        assert_eq!(screen.components[0].trace_ref.file_key, "DOC");
        assert_eq!(screen.components[0].children[0].trace_ref.file_key, "OTHER");
    }

    #[test]
    fn deeply_nested_components_load() {
        const DEPTH: usize = 250;
        let mut tree = String::new();
        for i in 0..DEPTH {
            tree.push_str(&format!(r#"{{"traceRef":{{"nodeId":"n{}"}},"type":"container","children":["#, i));
        }
        tree.push_str(&"]}".repeat(DEPTH));
        let json = format!(
            r#"{{"fileKey":"DEEP","screens":[{{"traceRef":{{"nodeId":"s"}},"name":"Deep","width":360,"height":640,"components":[{}]}}]}}"#,
            tree
        );
        let dir = tempdir().unwrap();
        let path = dir.path().join("design.json");
        std::fs::write(&path, json).unwrap();

        let doc = load_design_document(&path).unwrap();
        let nodes: Vec<_> = parity_core::preorder(&doc.screens[0].components).collect();
        assert_eq!(nodes.len(), DEPTH);
        assert_eq!(nodes[DEPTH - 1].trace_ref.node_id, format!("n{}", DEPTH - 1));
        assert!(nodes.iter().all(|n| n.trace_ref.file_key == "DEEP"));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.json");
        std::fs::write(&path, r#"{"screens":[]} extra"#).unwrap();
        assert!(load_app_capture(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error_naming_the_path() {
        let err = load_app_capture(Path::new("/nonexistent/app.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/app.json"));
    }
}
