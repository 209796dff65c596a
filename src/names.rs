//! Persisted names shared by the property serializers.
//!
//! These strings are part of the on-disk format and registry keys; they must
//! match existing project files exactly.

/// Kind tag of the IntelliJ Platform plugin SDK.
pub const IDEA_SDK_TYPE_ID: &str = "IDEA JDK";
/// Kind tag of plugin modules (`<module type="PLUGIN_MODULE">`).
pub const PLUGIN_MODULE_TYPE_ID: &str = "PLUGIN_MODULE";

// SDK additional data
pub const SANDBOX_HOME_FIELD: &str = "mySandboxHome";
pub const JDK_NAME_ATTRIBUTE: &str = "sdk";

// Plugin module build properties
pub const MODULE_BUILD_PROPERTIES_COMPONENT: &str = "DevKit.ModuleBuildProperties";
pub const URL_ATTRIBUTE: &str = "url";
pub const MANIFEST_ATTRIBUTE: &str = "manifest";

// Tree conventions
pub const OPTION_TAG: &str = "option";
pub const OPTION_NAME_ATTRIBUTE: &str = "name";
pub const OPTION_VALUE_ATTRIBUTE: &str = "value";
pub const COMPONENT_TAG: &str = "component";
pub const COMPONENT_NAME_ATTRIBUTE: &str = "name";
