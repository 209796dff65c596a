use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// SDK properties
// ────────────────────────────────────────────────────────────────────────────

/// Additional data of an "IDEA JDK" SDK.
///
/// `home_path` and `version` come from the SDK entry itself; only
/// `sandbox_home` and `jdk_name` are stored in the additional-data element.
/// Values are fixed at construction; build a new record to change one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaSdkProperties {
    home_path: String,
    version: String,
    /// Stored as the `mySandboxHome` field.
    sandbox_home: Option<String>,
    /// Name of the JDK the plugin SDK runs on, stored as the `sdk` attribute.
    jdk_name: Option<String>,
}

impl IdeaSdkProperties {
    pub fn new(
        home_path: impl Into<String>,
        version: impl Into<String>,
        sandbox_home: Option<String>,
        jdk_name: Option<String>,
    ) -> Self {
        Self {
            home_path: home_path.into(),
            version: version.into(),
            sandbox_home,
            jdk_name,
        }
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn sandbox_home(&self) -> Option<&str> {
        self.sandbox_home.as_deref()
    }
    pub fn jdk_name(&self) -> Option<&str> {
        self.jdk_name.as_deref()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Module properties
// ────────────────────────────────────────────────────────────────────────────

/// Build properties of a plugin module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginModuleProperties {
    /// URL of the `plugin.xml` descriptor (`url` attribute).
    plugin_xml_url: Option<String>,
    /// URL of the `MANIFEST.MF` file (`manifest` attribute).
    manifest_file_url: Option<String>,
}

impl PluginModuleProperties {
    pub fn new(plugin_xml_url: Option<String>, manifest_file_url: Option<String>) -> Self {
        Self {
            plugin_xml_url,
            manifest_file_url,
        }
    }

    pub fn plugin_xml_url(&self) -> Option<&str> {
        self.plugin_xml_url.as_deref()
    }
    pub fn manifest_file_url(&self) -> Option<&str> {
        self.manifest_file_url.as_deref()
    }
}
