//! Package and manifest tests

#![cfg(feature = "package")]

use iflow_converter::convert::convert;
use iflow_converter::export::package::{IFLOW_DIR, SCRIPT_DIR};
use iflow_converter::export::{IflowPackage, ManifestFiles};
use serde_json::json;
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn converted() -> iflow_converter::ConversionOutput {
    convert(&json!({
        "version": "1.0",
        "iflow": {
            "id": "Invoice_Export",
            "name": "Invoice Export",
            "description": "Exports invoices",
            "version": "3.2.1"
        },
        "endpoints": [{
            "id": "ep1",
            "name": "Invoices",
            "components": [
                {"type": "groovy_script", "id": "Script_1", "config": {"script": "enrich.groovy"}},
                {"type": "sftp_receiver", "id": "SFTP_1", "config": {"host": "files.example.com"}}
            ],
            "flow": ["Script_1", "SFTP_1"]
        }]
    }))
    .unwrap()
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing entry {}", name))
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn package_contains_fixed_layout() {
    let output = converted();
    let package = IflowPackage::new(output.xml.clone(), ManifestFiles::from_descriptor(&output.iflow))
        .with_script("enrich.groovy", "def processData(message) { message }");
    let bytes = package.to_bytes().unwrap();

    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            ".project".to_string(),
            "META-INF/MANIFEST.MF".to_string(),
            "META-INF/metainfo.prop".to_string(),
            format!("{}/Invoice_Export.iflw", IFLOW_DIR),
            format!("{}/enrich.groovy", SCRIPT_DIR),
        ]
    );

    let iflw = read_entry(&mut archive, &format!("{}/Invoice_Export.iflw", IFLOW_DIR));
    assert_eq!(iflw, output.xml);

    let manifest = read_entry(&mut archive, "META-INF/MANIFEST.MF");
    assert!(manifest.contains("Bundle-SymbolicName: Invoice_Export; singleton:=true"));
    assert!(manifest.contains("Bundle-Version: 3.2.1"));

    let metainfo = read_entry(&mut archive, "META-INF/metainfo.prop");
    assert!(metainfo.contains("description=Exports invoices"));
}

#[test]
fn packages_are_reproducible() {
    let output = converted();
    let build = || {
        IflowPackage::new(output.xml.clone(), ManifestFiles::from_descriptor(&output.iflow))
            .to_bytes()
            .unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn package_can_be_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.zip");
    let output = converted();
    IflowPackage::new(output.xml, ManifestFiles::from_descriptor(&output.iflow))
        .write_to_file(&path)
        .unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let archive = ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 4);
}
