//! Listing commands for templates and output sinks

use anyhow::Result;
use colored::*;
use is_terminal::IsTerminal;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use gisrep::{OutputRegistry, TemplateLibrary};

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(serde::Serialize)]
struct TemplateInfo {
    tag: String,
    description: Option<String>,
    source: Option<String>,
}

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(serde::Serialize)]
struct OutputInfo {
    tag: String,
    description: String,
}

pub fn run_templates_list(format: OutputFormat) -> Result<()> {
    // Built-in templates plus any user templates
    let mut library = TemplateLibrary::builtin()?;

    let user_dir = dirs::home_dir()
        .map(|home| home.join(".gisrep").join("templates"))
        .filter(|path| path.exists());

    if let Some(dir) = user_dir {
        library.add_directory(&dir)?;
    }

    let infos: Vec<TemplateInfo> = library
        .list()
        .into_iter()
        .map(|template| TemplateInfo {
            tag: template.name().to_string(),
            description: template.description().map(String::from),
            source: template
                .source()
                .map(|path| path.display().to_string()),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&infos)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<TemplateRow> = infos
                .iter()
                .map(|info| TemplateRow {
                    tag: info.tag.clone(),
                    description: info.description.clone().unwrap_or_default(),
                    source: info
                        .source
                        .clone()
                        .unwrap_or_else(|| "built-in".to_string()),
                })
                .collect();
            display_table(Table::new(rows));
        }
    }

    Ok(())
}

pub fn run_outputs_list(format: OutputFormat) -> Result<()> {
    let registry = OutputRegistry::builtin()?;

    let infos: Vec<OutputInfo> = registry
        .list()
        .into_iter()
        .map(|kind| OutputInfo {
            tag: kind.tag().to_string(),
            description: kind.description().to_string(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&infos)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<OutputRow> = infos
                .iter()
                .map(|info| OutputRow {
                    tag: info.tag.clone(),
                    description: info.description.clone(),
                })
                .collect();
            display_table(Table::new(rows));
        }
    }

    Ok(())
}

fn display_table(mut table: Table) {
    table.with(Style::modern());
    table.with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    if io::stdout().is_terminal() {
        table.with(Modify::new(Rows::one(0)).with(Color::FG_BRIGHT_CYAN));
    }

    println!("{}", table);

    if io::stdout().is_terminal() {
        println!();
        println!(
            "Select with {} or {}",
            "--template".cyan(),
            "--output".cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_list_table() {
        let result = run_templates_list(OutputFormat::Table);
        assert!(result.is_ok());
    }

    #[test]
    fn test_templates_list_json() {
        let result = run_templates_list(OutputFormat::Json);
        assert!(result.is_ok());
    }

    #[test]
    fn test_outputs_list_table() {
        let result = run_outputs_list(OutputFormat::Table);
        assert!(result.is_ok());
    }

    #[test]
    fn test_outputs_list_json() {
        let result = run_outputs_list(OutputFormat::Json);
        assert!(result.is_ok());
    }
}
