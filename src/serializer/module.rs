use super::ModulePropertiesSerializer;
use crate::model::PluginModuleProperties;
use crate::names::{
    MANIFEST_ATTRIBUTE, MODULE_BUILD_PROPERTIES_COMPONENT, PLUGIN_MODULE_TYPE_ID, URL_ATTRIBUTE,
};
use crate::tree::{self, Element};
use tracing::{debug, trace};

/// Serializer for `"PLUGIN_MODULE"` modules.
///
/// Properties live on the `<component name="DevKit.ModuleBuildProperties">`
/// child of the module root as `url` and `manifest` attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginModulePropertiesSerializer;

impl ModulePropertiesSerializer for PluginModulePropertiesSerializer {
    type Properties = PluginModuleProperties;

    fn type_id(&self) -> &'static str {
        PLUGIN_MODULE_TYPE_ID
    }

    fn component_name(&self) -> Option<&'static str> {
        Some(MODULE_BUILD_PROPERTIES_COMPONENT)
    }

    fn load_properties(&self, module_root: Option<&Element>) -> PluginModuleProperties {
        let Some(component) = tree::find_component(module_root, MODULE_BUILD_PROPERTIES_COMPONENT)
        else {
            debug!("no {} component", MODULE_BUILD_PROPERTIES_COMPONENT);
            return PluginModuleProperties::default();
        };
        PluginModuleProperties::new(
            component.attribute(URL_ATTRIBUTE).map(str::to_string),
            component.attribute(MANIFEST_ATTRIBUTE).map(str::to_string),
        )
    }

    /// Writes only into an existing component; a missing component is never
    /// created. `None` values leave the existing attribute untouched, unlike the
    /// SDK serializer which always overwrites.
    fn save_properties(&self, properties: &PluginModuleProperties, module_root: &mut Element) {
        let Some(component) = module_root.find_component_mut(MODULE_BUILD_PROPERTIES_COMPONENT)
        else {
            debug!(
                "no {} component, plugin module properties not saved",
                MODULE_BUILD_PROPERTIES_COMPONENT
            );
            return;
        };
        if let Some(url) = properties.plugin_xml_url() {
            trace!(url, "saving plugin.xml url");
            component.set_attribute(URL_ATTRIBUTE, url);
        }
        if let Some(manifest) = properties.manifest_file_url() {
            trace!(manifest, "saving manifest url");
            component.set_attribute(MANIFEST_ATTRIBUTE, manifest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_without_attributes_loads_empty() {
        let root = Element::new("module").with_child(Element::component(MODULE_BUILD_PROPERTIES_COMPONENT));
        let props = PluginModulePropertiesSerializer.load_properties(Some(&root));
        assert_eq!(props, PluginModuleProperties::default());
    }

    #[test]
    fn other_components_are_ignored() {
        let root = Element::new("module")
            .with_child(Element::component("NewModuleRootManager").with_attribute("url", "x"));
        let props = PluginModulePropertiesSerializer.load_properties(Some(&root));
        assert_eq!(props.plugin_xml_url(), None);
    }
}
