//! Subcommand handlers
//!
//! Each handler writes its report to `out` and returns the process exit
//! status. Faults (unreadable files, corrupt stores) come back as `Err`.

use anyhow::{Context, Result};
use dform_catalog::{Catalog, DisplayNames};
use dform_confirm::ConfirmationView;
use dform_engine::{FormConfig, FormEngine, JsonFileStore, SubmitOutcome, Submission};
use std::io::Write;
use std::path::Path;

/// Exit status for a rejected submission or a runtime fault
pub(crate) const EXIT_REJECTED: u8 = 1;
/// Exit status for a catalog that fails its load-time checks
pub(crate) const EXIT_CONFIGURATION: u8 = 2;

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("loading catalog {}", path.display()))
}

fn load_values(path: &Path) -> Result<Submission> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading values {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing values {}", path.display()))
}

fn mount(catalog: Catalog, values: Option<&Path>, config: &FormConfig) -> Result<FormEngine> {
    let mut form = FormEngine::mount_with_config(catalog, config.clone());
    if let Some(path) = values {
        let record = load_values(path)?;
        let skipped = form.apply_values(&record)?;
        if !skipped.is_empty() {
            tracing::warn!(?skipped, "Values ignored for unknown or hidden fields");
        }
    }
    Ok(form)
}

/// `dform check`
pub(crate) fn check(catalog: &Path, out: &mut impl Write) -> Result<u8> {
    let catalog = match Catalog::load(catalog) {
        Ok(catalog) => catalog,
        Err(e) if e.is_configuration() => {
            writeln!(out, "configuration error: {e}")?;
            return Ok(EXIT_CONFIGURATION);
        }
        Err(e) => return Err(e).with_context(|| format!("loading catalog {}", catalog.display())),
    };

    writeln!(out, "{} fields", catalog.len())?;
    for field in &catalog {
        let mut line = format!("  {} ({})", field.name, field.field_type);
        if field.rules().required {
            line.push_str(" required");
        }
        let deps: Vec<&str> = field.dependencies().collect();
        if !deps.is_empty() {
            line.push_str(&format!(" hideWhen[{}]", deps.join(", ")));
        }
        writeln!(out, "{line}")?;
    }
    Ok(0)
}

/// `dform render`
pub(crate) fn render(
    catalog: &Path,
    values: Option<&Path>,
    json: bool,
    config: &FormConfig,
    out: &mut impl Write,
) -> Result<u8> {
    let form = mount(load_catalog(catalog)?, values, config)?;
    let fields = form.render();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&fields)?)?;
    } else {
        for field in &fields {
            writeln!(out, "{field}")?;
        }
    }
    Ok(0)
}

/// `dform submit`
pub(crate) fn submit(
    catalog: &Path,
    values: &Path,
    store: &Path,
    config: &FormConfig,
    out: &mut impl Write,
) -> Result<u8> {
    let mut form = mount(load_catalog(catalog)?, Some(values), config)?;
    let mut store = JsonFileStore::new(store);

    match form.submit(&mut store)? {
        SubmitOutcome::Submitted(record) => {
            writeln!(
                out,
                "submitted {} values under \"{}\" in {}",
                record.len(),
                config.handoff_key,
                store.path().display()
            )?;
            Ok(0)
        }
        SubmitOutcome::Rejected(errors) => {
            writeln!(out, "rejected with {} errors", errors.len())?;
            for error in errors.iter() {
                writeln!(out, "  {}: {}", error.field(), error.message())?;
            }
            Ok(EXIT_REJECTED)
        }
    }
}

/// `dform confirm`
pub(crate) fn confirm(
    store: &Path,
    names: Option<&Path>,
    config: &FormConfig,
    out: &mut impl Write,
) -> Result<u8> {
    let names = match names {
        Some(path) => DisplayNames::load(path)
            .with_context(|| format!("loading display names {}", path.display()))?,
        None => DisplayNames::new(),
    };
    let store = JsonFileStore::new(store);
    let view = ConfirmationView::load(&store, &config.handoff_key, &names)
        .with_context(|| format!("reading hand-off store {}", store.path().display()))?;
    writeln!(out, "{}", view.render_text())?;
    Ok(0)
}
