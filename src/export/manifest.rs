//! Bundle metadata files
//!
//! An iFlow archive carries three small fixed-template files next to the
//! process XML. They only depend on the iflow descriptor.

use crate::encoding::escape;
use crate::models::IflowDescriptor;
use serde::{Deserialize, Serialize};

pub const PROJECT_PATH: &str = ".project";
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const METAINFO_PATH: &str = "META-INF/metainfo.prop";

/// Generated `.project`, `MANIFEST.MF` and `metainfo.prop` contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFiles {
    pub iflow_id: String,
    pub project: String,
    pub manifest: String,
    pub metainfo: String,
}

impl ManifestFiles {
    /// Build all three files for an iflow.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iflow_converter::export::manifest::ManifestFiles;
    /// use iflow_converter::models::IflowDescriptor;
    ///
    /// let iflow = IflowDescriptor {
    ///     id: "Orders_Sync".to_string(),
    ///     name: "Orders Sync".to_string(),
    ///     description: "Nightly order replication".to_string(),
    ///     version: "1.0.2".to_string(),
    /// };
    /// let files = ManifestFiles::from_descriptor(&iflow);
    /// assert!(files.manifest.contains("Bundle-SymbolicName: Orders_Sync; singleton:=true"));
    /// assert!(files.metainfo.contains("description=Nightly order replication"));
    /// ```
    pub fn from_descriptor(iflow: &IflowDescriptor) -> Self {
        Self {
            iflow_id: iflow.id.clone(),
            project: project_file(&iflow.id),
            manifest: manifest_file(iflow),
            metainfo: metainfo_file(&iflow.description),
        }
    }

    /// Archive path and content of each file, in archive order
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (PROJECT_PATH, self.project.as_str()),
            (MANIFEST_PATH, self.manifest.as_str()),
            (METAINFO_PATH, self.metainfo.as_str()),
        ]
    }
}

fn project_file(id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
	<name>{}</name>
	<comment></comment>
	<projects>
	</projects>
	<buildSpec>
		<buildCommand>
			<name>org.eclipse.jdt.core.javabuilder</name>
			<arguments>
			</arguments>
		</buildCommand>
	</buildSpec>
	<natures>
		<nature>org.eclipse.jdt.core.javanature</nature>
		<nature>com.sap.ide.ifl.project.support.project.nature</nature>
		<nature>com.sap.ide.ifl.bsn</nature>
	</natures>
</projectDescription>
"#,
        escape(id)
    )
}

fn manifest_file(iflow: &IflowDescriptor) -> String {
    let name = single_line(&iflow.name);
    let symbolic_name = single_line(&iflow.id);
    let headers = [
        ("Manifest-Version", "1.0".to_string()),
        ("Bundle-ManifestVersion", "2".to_string()),
        ("Bundle-Name", name.clone()),
        ("Bundle-SymbolicName", format!("{}; singleton:=true", symbolic_name)),
        ("Bundle-Version", single_line(&iflow.version)),
        ("SAP-BundleType", "IntegrationFlow".to_string()),
        ("SAP-NodeType", "IFLMAP".to_string()),
        ("SAP-RuntimeProfile", "iflmap".to_string()),
        ("Origin-Bundle-Name", name),
        ("Origin-Bundle-SymbolicName", symbolic_name),
    ];

    let mut out = String::new();
    for (header, value) in headers {
        out.push_str(header);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

fn metainfo_file(description: &str) -> String {
    let mut value = String::with_capacity(description.len());
    for ch in description.chars() {
        match ch {
            '\\' => value.push_str("\\\\"),
            '\n' => value.push_str("\\n"),
            '\r' => value.push_str("\\r"),
            _ => value.push(ch),
        }
    }
    format!("#Store metainfo properties\ndescription={}\n", value)
}

/// Manifest headers cannot span lines
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iflow() -> IflowDescriptor {
        IflowDescriptor {
            id: "Orders_Sync".to_string(),
            name: "Orders\nSync".to_string(),
            description: "line one\nline two".to_string(),
            version: "2.1.0".to_string(),
        }
    }

    #[test]
    fn manifest_carries_bundle_headers() {
        let files = ManifestFiles::from_descriptor(&iflow());
        assert!(files.manifest.starts_with("Manifest-Version: 1.0\n"));
        assert!(files.manifest.contains("Bundle-Name: Orders Sync\n"));
        assert!(files.manifest.contains("Bundle-Version: 2.1.0\n"));
        assert!(files.manifest.contains("SAP-BundleType: IntegrationFlow\n"));
    }

    #[test]
    fn header_values_stay_on_one_line() {
        let mut descriptor = iflow();
        descriptor.id = "Orders\nEvil-Header: x".to_string();
        let files = ManifestFiles::from_descriptor(&descriptor);
        assert!(files.manifest.contains("Bundle-SymbolicName: Orders Evil-Header: x; singleton:=true\n"));
        assert!(files.manifest.contains("Origin-Bundle-SymbolicName: Orders Evil-Header: x\n"));
        assert!(!files.manifest.lines().any(|line| line.starts_with("Evil-Header")));
        assert_eq!(files.manifest.lines().count(), 10);
    }

    #[test]
    fn metainfo_escapes_newlines() {
        let files = ManifestFiles::from_descriptor(&iflow());
        assert_eq!(
            files.metainfo,
            "#Store metainfo properties\ndescription=line one\\nline two\n"
        );
    }

    #[test]
    fn project_names_the_iflow() {
        let files = ManifestFiles::from_descriptor(&iflow());
        assert!(files.project.contains("<name>Orders_Sync</name>"));
        let paths: Vec<_> = files.entries().iter().map(|(p, _)| *p).collect();
        assert_eq!(paths, vec![PROJECT_PATH, MANIFEST_PATH, METAINFO_PATH]);
    }
}
