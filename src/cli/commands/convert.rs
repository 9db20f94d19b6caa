//! Convert command implementation

use super::load_document;
use crate::cli::error::CliError;
use crate::config::ConverterConfig;
use crate::convert::IflowConverter;
use crate::export::{IflowPackage, ManifestFiles};
use crate::validation::sanitize_file_name;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Input file path or '-' for stdin
    pub input: String,
    /// Output path; defaults to `<iflow id>.zip` (or `.iflw` with `xml_only`)
    pub output: Option<PathBuf>,
    /// Write only the process XML instead of a package
    pub xml_only: bool,
    /// Endpoint to convert when the document declares several
    pub endpoint: Option<String>,
    /// Directory of scripts to add to the package
    pub scripts: Option<PathBuf>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Overwrite an existing output file
    pub force: bool,
}

fn input_dir(input: &str) -> PathBuf {
    if input == "-" {
        return PathBuf::from(".");
    }
    match Path::new(input).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load_config(args: &ConvertArgs) -> Result<ConverterConfig, CliError> {
    let config = match &args.config {
        Some(path) => ConverterConfig::load_file(path)?,
        None => ConverterConfig::load(&input_dir(&args.input))?,
    };
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// Default output path for an iflow id
pub fn default_output_path(iflow_id: &str, xml_only: bool) -> PathBuf {
    let extension = if xml_only { "iflw" } else { "zip" };
    PathBuf::from(format!("{}.{}", sanitize_file_name(iflow_id), extension))
}

/// Read every regular file of `dir`, sorted by name
pub fn read_scripts(dir: &Path) -> Result<Vec<(String, Vec<u8>)>, CliError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CliError::FileReadError(dir.to_path_buf(), e.to_string()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CliError::FileReadError(dir.to_path_buf(), e.to_string()))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut scripts = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| CliError::InvalidArgument(format!("Unusable script name: {}", path.display())))?;
        let content =
            std::fs::read(&path).map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?;
        scripts.push((name, content));
    }
    Ok(scripts)
}

/// Handle the convert command
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let config = load_config(args)?;
    let document = load_document(&args.input)?;

    let converter = IflowConverter::new(config);
    let output = converter.convert_endpoint(&document, args.endpoint.as_deref())?;

    for warning in &output.warnings {
        eprintln!("Warning: {}", warning);
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&output.iflow.id, args.xml_only));
    if output_path.exists() && !args.force {
        return Err(CliError::OutputExists(output_path));
    }

    if args.xml_only {
        std::fs::write(&output_path, &output.xml)
            .map_err(|e| CliError::FileWriteError(output_path.clone(), e.to_string()))?;
        info!("Wrote iFlow XML {}", output_path.display());
    } else {
        let script_dir = args
            .scripts
            .clone()
            .or_else(|| converter.config().script_dir(&input_dir(&args.input)));

        let mut package =
            IflowPackage::new(output.xml, ManifestFiles::from_descriptor(&output.iflow));
        if let Some(dir) = script_dir {
            for (name, content) in read_scripts(&dir)? {
                package = package.with_script(&name, content);
            }
        }
        package.write_to_file(&output_path)?;
    }

    println!(
        "Converted '{}' (endpoint '{}') to {}",
        output.iflow.id,
        output.endpoint_id,
        output_path.display()
    );
    Ok(())
}
