use parity_core::{
    preorder, AppCapture, AppElement, AppTraceRef, ComponentType, DesignComponent, DesignDocument, DesignTraceRef,
    Platform, Rect, Rgba,
};

#[test]
fn test_design_document_from_camel_case_json() {
    let json = r##"{
        "fileKey": "abc123",
        "screens": [{
            "traceRef": { "nodeId": "1:1", "fileKey": "abc123", "nodeName": "Login" },
            "name": "Login",
            "width": 375,
            "height": 812,
            "components": [{
                "traceRef": { "nodeId": "1:2", "fileKey": "abc123", "nodeName": "login-button" },
                "type": "button",
                "styles": {
                    "layout": { "x": 16, "y": 700, "width": 343, "height": 48 },
                    "backgroundColor": { "r": 0, "g": 122, "b": 255 },
                    "typography": { "fontFamily": "Inter", "fontSize": 16 }
                },
                "text": "Log in"
            }]
        }]
    }"##;
    let doc: DesignDocument = serde_json::from_str(json).unwrap();
    let screen = &doc.screens[0];
    assert_eq!(screen.trace_ref.display_name(), "Login");
    let button = &screen.components[0];
    assert_eq!(button.component_type, ComponentType::Button);
    assert_eq!(button.styles.layout, Some(Rect::new(16.0, 700.0, 343.0, 48.0)));
    assert_eq!(button.styles.background_color, Some(Rgba::rgb(0, 122, 255)));
    assert!(button.is_leaf());
}

#[test]
fn test_app_capture_defaults() {
    let json = r##"{
        "platform": "ios",
        "sessionId": "s-1",
        "screens": [{
            "traceRef": { "elementId": "root", "sessionId": "s-1" },
            "name": "Login",
            "width": 1080,
            "height": 2340,
            "elements": [{
                "traceRef": { "elementId": "e1", "sessionId": "s-1", "resourceId": "com.app:id/login_button" },
                "styles": { "bounds": { "x": 0, "y": 0, "width": 10, "height": 10 } }
            }]
        }]
    }"##;
    let capture: AppCapture = serde_json::from_str(json).unwrap();
    assert_eq!(capture.platform, Platform::Ios);
    let element = &capture.screens[0].elements[0];
    assert_eq!(element.component_type, ComponentType::Unknown);
    assert!(element.styles.visible);
    assert_eq!(element.trace_ref.platform, Platform::Android);
}

#[test]
fn test_component_type_wire_name() {
    let v = serde_json::to_value(ComponentType::Icon).unwrap();
    assert_eq!(v, serde_json::json!("icon"));
    assert_eq!(ComponentType::Icon.as_str(), "icon");
}

#[test]
fn test_preorder_over_app_elements() {
    let mut root = AppElement::new(AppTraceRef::new("s", "root"), ComponentType::Container);
    root.children.push(AppElement::new(AppTraceRef::new("s", "child"), ComponentType::Text));
    let ids: Vec<_> = preorder(std::slice::from_ref(&root)).map(|e| e.trace_ref.element_id.clone()).collect();
    assert_eq!(ids, vec!["root", "child"]);
}

#[test]
fn test_display_name_falls_back_to_node_id() {
    let r = DesignTraceRef::new("f", "9:9");
    assert_eq!(r.display_name(), "9:9");
    let named = DesignComponent::new(r.with_name("Title"), ComponentType::Text);
    assert_eq!(named.trace_ref.display_name(), "Title");
}
