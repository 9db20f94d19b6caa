//! Types command implementation
//!
//! Lists the registered component types.

use crate::cli::error::CliError;
use crate::templates::{Category, TemplateDescriptor, registry};

/// One output line per template: tag, category, element, variant URI
pub fn format_types(category: Option<Category>) -> Vec<String> {
    let line = |t: &TemplateDescriptor| {
        format!(
            "{:<32} {:<15} {:<24} {}",
            t.type_tag,
            t.category.as_str(),
            t.element.element_name(),
            t.variant_uri
        )
    };

    match category {
        Some(category) => registry().by_category(category).map(line).collect(),
        None => registry().iter().map(line).collect(),
    }
}

/// Handle the types command
pub fn handle_types(category: Option<&str>) -> Result<(), CliError> {
    let category = category
        .map(|c| c.parse::<Category>().map_err(CliError::InvalidArgument))
        .transpose()?;

    let lines = format_types(category);
    for line in &lines {
        println!("{}", line);
    }
    println!("{} component type(s)", lines.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_type_without_filter() {
        assert_eq!(format_types(None).len(), registry().len());
    }

    #[test]
    fn filters_by_category() {
        let adapters = format_types(Some(Category::Adapter));
        assert!(!adapters.is_empty());
        assert!(adapters.iter().all(|l| l.contains("ctype::AdapterVariant")));
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(matches!(
            handle_types(Some("teleport")),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
