//! Deployable iFlow archive
//!
//! Lays out the bundle files, the process XML and any scripts in a zip archive.
//! Every entry gets the same fixed timestamp so identical input yields an
//! identical archive.

use super::manifest::ManifestFiles;
use crate::export::ExportError;
use crate::validation::sanitize_file_name;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const IFLOW_DIR: &str = "src/main/resources/scenarioflows/integrationflow";
pub const SCRIPT_DIR: &str = "src/main/resources/script";

/// Contents of one iFlow archive
#[derive(Debug, Clone)]
#[must_use = "packages do nothing until written with to_bytes or write_to_file"]
pub struct IflowPackage {
    xml: String,
    manifest: ManifestFiles,
    scripts: Vec<(String, Vec<u8>)>,
}

impl IflowPackage {
    pub fn new(xml: impl Into<String>, manifest: ManifestFiles) -> Self {
        Self {
            xml: xml.into(),
            manifest,
            scripts: Vec::new(),
        }
    }

    /// Add a script placed under `src/main/resources/script/`.
    ///
    /// The file name is sanitized; a later script with the same name replaces
    /// the earlier one.
    pub fn with_script(mut self, file_name: &str, content: impl Into<Vec<u8>>) -> Self {
        let file_name = sanitize_file_name(file_name);
        let content = content.into();
        match self.scripts.iter_mut().find(|(name, _)| *name == file_name) {
            Some(existing) => existing.1 = content,
            None => self.scripts.push((file_name, content)),
        }
        self
    }

    /// Archive path of the process XML, named after the bundle symbolic name
    pub fn iflow_path(&self) -> String {
        format!(
            "{}/{}.iflw",
            IFLOW_DIR,
            sanitize_file_name(&self.manifest.iflow_id)
        )
    }

    /// Every archive path, in write order
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .manifest
            .entries()
            .iter()
            .map(|(path, _)| path.to_string())
            .collect();
        names.push(self.iflow_path());
        names.extend(
            self.scripts
                .iter()
                .map(|(name, _)| format!("{}/{}", SCRIPT_DIR, name)),
        );
        names
    }

    /// Write the archive into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut add = |path: String, bytes: &[u8]| -> Result<(), ExportError> {
            debug!("Adding archive entry {} ({} bytes)", path, bytes.len());
            zip.start_file(path.clone(), options)
                .map_err(|e| ExportError::IoError(format!("Failed to add '{}': {}", path, e)))?;
            zip.write_all(bytes)
                .map_err(|e| ExportError::IoError(format!("Failed to write '{}': {}", path, e)))
        };

        for (path, content) in self.manifest.entries() {
            add(path.to_string(), content.as_bytes())?;
        }
        add(self.iflow_path(), self.xml.as_bytes())?;
        for (name, content) in &self.scripts {
            add(format!("{}/{}", SCRIPT_DIR, name), content.as_slice())?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ExportError::IoError(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }

    /// Write the archive to `path`.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|e| {
            ExportError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!("Wrote iFlow package {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IflowDescriptor;
    use std::io::Read;
    use zip::ZipArchive;

    fn manifest() -> ManifestFiles {
        ManifestFiles::from_descriptor(&IflowDescriptor {
            id: "Orders Sync".to_string(),
            name: "Orders".to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
        })
    }

    #[test]
    fn lays_out_fixed_entries() {
        let package = IflowPackage::new("<a/>", manifest()).with_script("map.groovy", "x");
        assert_eq!(
            package.entry_names(),
            vec![
                ".project".to_string(),
                "META-INF/MANIFEST.MF".to_string(),
                "META-INF/metainfo.prop".to_string(),
                "src/main/resources/scenarioflows/integrationflow/Orders_Sync.iflw".to_string(),
                "src/main/resources/script/map.groovy".to_string(),
            ]
        );
    }

    #[test]
    fn xml_is_stored_verbatim() {
        let xml = "<?xml version=\"1.0\"?><a>&amp;</a>";
        let bytes = IflowPackage::new(xml, manifest()).to_bytes().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut stored = String::new();
        archive
            .by_name("src/main/resources/scenarioflows/integrationflow/Orders_Sync.iflw")
            .unwrap()
            .read_to_string(&mut stored)
            .unwrap();
        assert_eq!(stored, xml);
    }

    #[test]
    fn archives_are_byte_stable() {
        let a = IflowPackage::new("<a/>", manifest()).to_bytes().unwrap();
        let b = IflowPackage::new("<a/>", manifest()).to_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn iflow_file_follows_the_symbolic_name() {
        let files = manifest();
        assert!(files.manifest.contains("Bundle-SymbolicName: Orders Sync; singleton:=true"));
        assert_eq!(
            IflowPackage::new("<a/>", files).iflow_path(),
            format!("{}/Orders_Sync.iflw", IFLOW_DIR)
        );
    }

    #[test]
    fn later_script_replaces_earlier() {
        let package = IflowPackage::new("<a/>", manifest())
            .with_script("s.groovy", "one")
            .with_script("s.groovy", "two");
        assert_eq!(package.entry_names().len(), 5);
    }
}
