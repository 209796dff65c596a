//! DevKit project-model properties.
//!
//! This crate loads and saves the DevKit-specific parts of project
//! configuration against a generic XML [`tree::Element`]:
//!
//! - [`serializer::IdeaSdkPropertiesSerializer`] – additional data of
//!   `"IDEA JDK"` SDKs (sandbox home, JDK name)
//! - [`serializer::PluginModulePropertiesSerializer`] – build properties of
//!   `"PLUGIN_MODULE"` modules (`plugin.xml` and manifest URLs)
//!
//! The binary `devkit-props` reads and updates these properties in files and
//! prints them as JSON.

pub mod model;
pub mod names;
pub mod serializer;
pub mod source;
pub mod tree;

pub use model::{IdeaSdkProperties, PluginModuleProperties};
pub use serializer::{
    DevKitSerializerExtension, IdeaSdkPropertiesSerializer, ModulePropertiesSerializer,
    PluginModulePropertiesSerializer, SdkPropertiesSerializer,
};
pub use tree::{Document, Element, Node};
