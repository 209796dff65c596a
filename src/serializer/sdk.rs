use super::SdkPropertiesSerializer;
use crate::model::IdeaSdkProperties;
use crate::names::{IDEA_SDK_TYPE_ID, JDK_NAME_ATTRIBUTE, SANDBOX_HOME_FIELD};
use crate::tree::Element;
use tracing::{debug, trace};

/// Serializer for the additional data of `"IDEA JDK"` SDKs.
///
/// The sandbox home is kept in an `<option name="mySandboxHome">` field while
/// the JDK name is a plain `sdk` attribute on the same element.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdeaSdkPropertiesSerializer;

impl SdkPropertiesSerializer for IdeaSdkPropertiesSerializer {
    type Properties = IdeaSdkProperties;

    fn type_id(&self) -> &'static str {
        IDEA_SDK_TYPE_ID
    }

    fn load_properties(
        &self,
        home_path: &str,
        version: &str,
        element: Option<&Element>,
    ) -> IdeaSdkProperties {
        let (sandbox_home, jdk_name) = match element {
            Some(e) => (
                e.field(SANDBOX_HOME_FIELD).map(str::to_string),
                e.attribute(JDK_NAME_ATTRIBUTE).map(str::to_string),
            ),
            None => {
                debug!(home_path, "no additional data for IDEA SDK");
                (None, None)
            }
        };
        IdeaSdkProperties::new(home_path, version, sandbox_home, jdk_name)
    }

    /// Always overwrites both slots: a `None` sandbox home removes the field and
    /// a `None` JDK name is written as `sdk=""`. The module serializer instead
    /// leaves attributes alone for `None` values.
    fn save_properties(&self, properties: &IdeaSdkProperties, element: &mut Element) {
        trace!(
            sandbox_home = ?properties.sandbox_home(),
            jdk_name = ?properties.jdk_name(),
            "saving IDEA SDK properties"
        );
        element.set_field(SANDBOX_HOME_FIELD, properties.sandbox_home());
        element.set_attribute(JDK_NAME_ATTRIBUTE, properties.jdk_name().unwrap_or(""));
    }
}
