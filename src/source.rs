//! Document storage abstraction and the file-level load/save helpers used by
//! the `devkit-props` binary.

use crate::model::{IdeaSdkProperties, PluginModuleProperties};
use crate::names::IDEA_SDK_TYPE_ID;
use crate::serializer::{
    IdeaSdkPropertiesSerializer, ModulePropertiesSerializer, PluginModulePropertiesSerializer,
    SdkPropertiesSerializer,
};
use crate::tree::{self, Document, Element};
use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8Path;
use tracing::{debug, warn};

// jdk.table.xml layout
pub const SDK_ENTRY_TAG: &str = "jdk";
pub const SDK_ADDITIONAL_DATA_TAG: &str = "additional";
const SDK_NAME_TAG: &str = "name";
const SDK_TYPE_TAG: &str = "type";
const SDK_HOME_PATH_TAG: &str = "homePath";
const SDK_VERSION_TAG: &str = "version";
const VALUE_ATTRIBUTE: &str = "value";

/// Trait for abstracting document I/O (filesystem vs. in-memory).
pub trait DocumentSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
    fn write_string(&mut self, path: &Utf8Path, content: &str) -> Result<()>;
}

/// Reads and writes documents on the local filesystem.
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path()).with_context(|| format!("Failed to read {}", path))
    }

    fn write_string(&mut self, path: &Utf8Path, content: &str) -> Result<()> {
        std::fs::write(path.as_std_path(), content)
            .with_context(|| format!("Failed to write {}", path))
    }
}

/// Read and parse an XML document.
pub fn read_document<S: DocumentSource>(source: &mut S, path: &Utf8Path) -> Result<Document> {
    let text = source.read_to_string(path)?;
    Document::parse(&text).with_context(|| format!("Failed to parse XML {}", path))
}

/// Regenerate and store an XML document.
pub fn write_document<S: DocumentSource>(
    source: &mut S,
    path: &Utf8Path,
    doc: &Document,
) -> Result<()> {
    source.write_string(path, &tree::generate_document(doc))
}

// ────────────────────────────────────────────────────────────────────────────
// SDKs
// ────────────────────────────────────────────────────────────────────────────

/// Selects an SDK in a document and supplies the values that are not part of
/// its additional data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkQuery<'a> {
    /// Match the `<name value="…">` of the `<jdk>` entry.
    pub name: Option<&'a str>,
    /// Overrides the entry's `<homePath>`.
    pub home_path: Option<&'a str>,
    /// Overrides the entry's `<version>`.
    pub version: Option<&'a str>,
}

fn entry_value<'a>(entry: &'a Element, tag: &str) -> Option<&'a str> {
    entry.child(tag).and_then(|e| e.attribute(VALUE_ATTRIBUTE))
}

fn is_idea_sdk_entry(entry: &Element, name: Option<&str>) -> bool {
    entry.name == SDK_ENTRY_TAG
        && entry_value(entry, SDK_TYPE_TAG) == Some(IDEA_SDK_TYPE_ID)
        && name.is_none_or(|n| entry_value(entry, SDK_NAME_TAG) == Some(n))
}

/// Path to the IDEA SDK `<jdk>` entry.
///
/// `Ok(None)` means the document has no `<jdk>` entries at all (a bare
/// additional-data fragment). A document listing SDKs but no matching IDEA
/// SDK is an error; other SDK kinds are never used instead.
pub fn sdk_entry_path(root: &Element, name: Option<&str>) -> Result<Option<Vec<usize>>> {
    if root.descendant(SDK_ENTRY_TAG).is_none() {
        return Ok(None);
    }
    match root.find_path(&|e: &Element| is_idea_sdk_entry(e, name)) {
        Some(path) => Ok(Some(path)),
        None => match name {
            Some(n) => bail!("No {} SDK named {:?}", IDEA_SDK_TYPE_ID, n),
            None => bail!("No {} SDK", IDEA_SDK_TYPE_ID),
        },
    }
}

/// The IDEA SDK entry (if the document lists SDKs) and its additional-data
/// element. A fragment without `<jdk>` entries uses its first `<additional>`
/// element, or the root.
pub fn sdk_data_element<'a>(
    root: &'a Element,
    name: Option<&str>,
) -> Result<(Option<&'a Element>, Option<&'a Element>)> {
    match sdk_entry_path(root, name)? {
        Some(path) => {
            let entry = root
                .at_path(&path)
                .ok_or_else(|| anyhow!("SDK entry path out of range"))?;
            Ok((Some(entry), entry.child(SDK_ADDITIONAL_DATA_TAG)))
        }
        None => Ok((
            None,
            Some(root.descendant(SDK_ADDITIONAL_DATA_TAG).unwrap_or(root)),
        )),
    }
}

pub fn load_sdk_file<S: DocumentSource>(
    source: &mut S,
    path: &Utf8Path,
    query: SdkQuery,
) -> Result<IdeaSdkProperties> {
    let doc = read_document(source, path)?;
    let (entry, data) =
        sdk_data_element(&doc.root, query.name).with_context(|| format!("In {}", path))?;
    let from_entry = |tag| entry.and_then(|e| entry_value(e, tag)).unwrap_or("");
    let home_path = query
        .home_path
        .unwrap_or_else(|| from_entry(SDK_HOME_PATH_TAG));
    let version = query.version.unwrap_or_else(|| from_entry(SDK_VERSION_TAG));
    Ok(IdeaSdkPropertiesSerializer.load_properties(home_path, version, data))
}

/// Save SDK properties into the IDEA SDK's additional data, creating the
/// `<additional>` element of a matched entry when it has none.
pub fn save_sdk_file<S: DocumentSource>(
    source: &mut S,
    path: &Utf8Path,
    name: Option<&str>,
    properties: &IdeaSdkProperties,
) -> Result<()> {
    let mut doc = read_document(source, path)?;
    let data_path = match sdk_entry_path(&doc.root, name).with_context(|| format!("In {}", path))? {
        Some(mut entry_path) => {
            let entry = doc
                .root
                .at_path_mut(&entry_path)
                .ok_or_else(|| anyhow!("SDK entry path out of range"))?;
            let index = match entry.child_index(SDK_ADDITIONAL_DATA_TAG) {
                Some(i) => i,
                None => {
                    debug!("creating <{}> for {} SDK", SDK_ADDITIONAL_DATA_TAG, IDEA_SDK_TYPE_ID);
                    entry.append_child(Element::new(SDK_ADDITIONAL_DATA_TAG))
                }
            };
            entry_path.push(index);
            entry_path
        }
        None => doc
            .root
            .descendant_path(SDK_ADDITIONAL_DATA_TAG)
            .unwrap_or_default(),
    };
    let element = doc
        .root
        .at_path_mut(&data_path)
        .ok_or_else(|| anyhow!("No SDK data element in {}", path))?;
    IdeaSdkPropertiesSerializer.save_properties(properties, element);
    write_document(source, path, &doc)
}

// ────────────────────────────────────────────────────────────────────────────
// Modules
// ────────────────────────────────────────────────────────────────────────────

pub fn load_module_file<S: DocumentSource>(
    source: &mut S,
    path: &Utf8Path,
) -> Result<PluginModuleProperties> {
    let doc = read_document(source, path)?;
    check_module_type(&doc.root, path);
    Ok(PluginModulePropertiesSerializer.load_properties(Some(&doc.root)))
}

/// Save `update` into a module file with the plugin module serializer.
///
/// Returns `false` without touching the file when the module has no
/// build-properties component.
pub fn update_module_file<S: DocumentSource>(
    source: &mut S,
    path: &Utf8Path,
    update: &PluginModuleProperties,
) -> Result<bool> {
    let serializer = PluginModulePropertiesSerializer;
    let component = serializer
        .component_name()
        .ok_or_else(|| anyhow!("module serializer has no component"))?;
    let mut doc = read_document(source, path)?;
    check_module_type(&doc.root, path);
    if doc.root.find_component(component).is_none() {
        warn!("{} has no {} component; nothing written", path, component);
        return Ok(false);
    }
    serializer.save_properties(update, &mut doc.root);
    write_document(source, path, &doc)?;
    debug!("updated {}", path);
    Ok(true)
}

fn check_module_type(root: &Element, path: &Utf8Path) {
    let serializer = PluginModulePropertiesSerializer;
    match root.attribute("type") {
        Some(t) if t == serializer.type_id() => {}
        other => debug!(
            "{}: module type {:?}, expected {}",
            path,
            other,
            serializer.type_id()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_uses_additional_or_root() -> Result<()> {
        let root = Element::parse(r#"<wrapper><additional sdk="17"/></wrapper>"#)?;
        let (entry, data) = sdk_data_element(&root, None)?;
        assert!(entry.is_none());
        assert_eq!(data.map(|e| e.name.as_str()), Some("additional"));

        let bare = Element::parse(r#"<additional sdk="17"/>"#)?;
        let (_, data) = sdk_data_element(&bare, None)?;
        assert_eq!(data.and_then(|e| e.attribute("sdk")), Some("17"));
        Ok(())
    }

    #[test]
    fn entry_without_additional_loads_absent() -> Result<()> {
        let root = Element::parse(
            r#"<application><jdk><type value="IDEA JDK"/></jdk></application>"#,
        )?;
        let (entry, data) = sdk_data_element(&root, None)?;
        assert!(entry.is_some());
        assert!(data.is_none());
        Ok(())
    }

    #[test]
    fn table_without_idea_sdk_is_an_error() -> Result<()> {
        let root = Element::parse(
            r#"<application><jdk><type value="JavaSDK"/><additional/></jdk></application>"#,
        )?;
        assert!(sdk_data_element(&root, None).is_err());
        Ok(())
    }
}
