use anyhow::Result;
use devkit_props::{Element, ModulePropertiesSerializer, PluginModuleProperties, PluginModulePropertiesSerializer};

const MODULE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module type="PLUGIN_MODULE" version="4">
  <component name="DevKit.ModuleBuildProperties" url="file://$MODULE_DIR$/META-INF/plugin.xml" manifest="file://$MODULE_DIR$/META-INF/MANIFEST.MF" />
  <component name="NewModuleRootManager" inherit-compiler-output="true">
    <exclude-output />
  </component>
</module>
"#;

const BARE_MODULE_XML: &str = r#"<module type="PLUGIN_MODULE" version="4">
  <component name="NewModuleRootManager" inherit-compiler-output="true" />
</module>"#;

#[test]
fn load_reads_component_attributes() -> Result<()> {
    let root = Element::parse(MODULE_XML)?;
    let props = PluginModulePropertiesSerializer.load_properties(Some(&root));
    assert_eq!(
        props.plugin_xml_url(),
        Some("file://$MODULE_DIR$/META-INF/plugin.xml")
    );
    assert_eq!(
        props.manifest_file_url(),
        Some("file://$MODULE_DIR$/META-INF/MANIFEST.MF")
    );
    Ok(())
}

#[test]
fn load_without_root_or_component_is_empty() -> Result<()> {
    assert_eq!(
        PluginModulePropertiesSerializer.load_properties(None),
        PluginModuleProperties::default()
    );
    let root = Element::parse(BARE_MODULE_XML)?;
    assert_eq!(
        PluginModulePropertiesSerializer.load_properties(Some(&root)),
        PluginModuleProperties::default()
    );
    Ok(())
}

#[test]
fn save_without_component_leaves_root_unchanged() -> Result<()> {
    let mut root = Element::parse(BARE_MODULE_XML)?;
    let before = root.clone();
    let before_text = root.to_xml_string();
    let props = PluginModuleProperties::new(Some("plugin.xml".into()), Some("MANIFEST.MF".into()));
    PluginModulePropertiesSerializer.save_properties(&props, &mut root);
    assert_eq!(root, before);
    assert_eq!(root.to_xml_string(), before_text);
    assert!(root.find_component("DevKit.ModuleBuildProperties").is_none());
    Ok(())
}

/// Absent values leave existing attributes alone, unlike SDK saves which
/// always write.
#[test]
fn save_writes_only_present_values() -> Result<()> {
    let mut root = Element::parse(MODULE_XML)?;
    let props = PluginModuleProperties::new(Some("plugin.xml".into()), None);
    PluginModulePropertiesSerializer.save_properties(&props, &mut root);
    let component = root
        .find_component("DevKit.ModuleBuildProperties")
        .expect("component");
    assert_eq!(component.attribute("url"), Some("plugin.xml"));
    assert_eq!(
        component.attribute("manifest"),
        Some("file://$MODULE_DIR$/META-INF/MANIFEST.MF")
    );

    let props = PluginModuleProperties::default();
    let before = root.clone();
    PluginModulePropertiesSerializer.save_properties(&props, &mut root);
    assert_eq!(root, before);
    Ok(())
}

#[test]
fn save_then_load_round_trips() {
    let mut root = Element::new("module")
        .with_attribute("type", "PLUGIN_MODULE")
        .with_child(Element::component("DevKit.ModuleBuildProperties"));
    let props = PluginModuleProperties::new(
        Some("file://$MODULE_DIR$/resources/META-INF/plugin.xml".into()),
        Some("file://$MODULE_DIR$/META-INF/MANIFEST.MF".into()),
    );
    PluginModulePropertiesSerializer.save_properties(&props, &mut root);
    assert_eq!(
        PluginModulePropertiesSerializer.load_properties(Some(&root)),
        props
    );
}

#[test]
fn save_is_idempotent() -> Result<()> {
    let mut once = Element::parse(MODULE_XML)?;
    let props = PluginModuleProperties::new(Some("a.xml".into()), Some("b.MF".into()));
    PluginModulePropertiesSerializer.save_properties(&props, &mut once);
    let mut twice = once.clone();
    PluginModulePropertiesSerializer.save_properties(&props, &mut twice);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn save_keeps_attribute_order() -> Result<()> {
    let mut root = Element::parse(MODULE_XML)?;
    let props = PluginModuleProperties::new(None, Some("b.MF".into()));
    PluginModulePropertiesSerializer.save_properties(&props, &mut root);
    let component = root
        .find_component("DevKit.ModuleBuildProperties")
        .expect("component");
    let keys: Vec<&str> = component.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, ["name", "url", "manifest"]);
    Ok(())
}
