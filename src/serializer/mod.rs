//! Property serializers for DevKit SDKs and plugin modules.
//!
//! - [`sdk`] – [`IdeaSdkPropertiesSerializer`] for the `"IDEA JDK"` SDK kind
//! - [`module`] – [`PluginModulePropertiesSerializer`] for `"PLUGIN_MODULE"` modules
//!
//! Serializers are stateless and never fail: missing elements, components or
//! attributes load as `None`, and saves that have nowhere to write are no-ops.
//! [`DevKitSerializerExtension`] exposes them to a registry by kind tag.

pub mod module;
pub mod sdk;

pub use module::PluginModulePropertiesSerializer;
pub use sdk::IdeaSdkPropertiesSerializer;

use crate::model::{IdeaSdkProperties, PluginModuleProperties};
use crate::tree::Element;

/// Loads and saves the additional data of one SDK kind.
pub trait SdkPropertiesSerializer {
    type Properties;

    /// Registered SDK kind tag.
    fn type_id(&self) -> &'static str;

    /// Build properties from an SDK's additional-data element. `home_path` and
    /// `version` come from the SDK entry and pass through unchanged.
    fn load_properties(
        &self,
        home_path: &str,
        version: &str,
        element: Option<&Element>,
    ) -> Self::Properties;

    fn save_properties(&self, properties: &Self::Properties, element: &mut Element);
}

/// Loads and saves the type-specific properties of one module kind.
pub trait ModulePropertiesSerializer {
    type Properties;

    /// Registered module kind tag (the `type` attribute of `<module>`).
    fn type_id(&self) -> &'static str;

    /// Component that stores the properties, if the kind uses one.
    fn component_name(&self) -> Option<&'static str> {
        None
    }

    fn load_properties(&self, module_root: Option<&Element>) -> Self::Properties;

    fn save_properties(&self, properties: &Self::Properties, module_root: &mut Element);
}

/// The DevKit set of serializers, looked up by kind tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevKitSerializerExtension {
    sdk: IdeaSdkPropertiesSerializer,
    module: PluginModulePropertiesSerializer,
}

impl DevKitSerializerExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sdk_properties_serializers(
        &self,
    ) -> Vec<&dyn SdkPropertiesSerializer<Properties = IdeaSdkProperties>> {
        vec![&self.sdk as &dyn SdkPropertiesSerializer<Properties = IdeaSdkProperties>]
    }

    pub fn module_properties_serializers(
        &self,
    ) -> Vec<&dyn ModulePropertiesSerializer<Properties = PluginModuleProperties>> {
        vec![&self.module as &dyn ModulePropertiesSerializer<Properties = PluginModuleProperties>]
    }

    pub fn sdk_serializer(&self, type_id: &str) -> Option<&IdeaSdkPropertiesSerializer> {
        (self.sdk.type_id() == type_id).then_some(&self.sdk)
    }

    pub fn module_serializer(&self, type_id: &str) -> Option<&PluginModulePropertiesSerializer> {
        (self.module.type_id() == type_id).then_some(&self.module)
    }

    pub fn is_sdk_type(&self, type_id: &str) -> bool {
        self.sdk_serializer(type_id).is_some()
    }

    pub fn is_module_type(&self, type_id: &str) -> bool {
        self.module_serializer(type_id).is_some()
    }
}
