//! Subcommand implementations

use anyhow::{bail, Context};
use portal_core::key_vault::KeyVaultLink;
use portal_core::{
    KeyVaultReference, KeyVaultReferenceView, PortalConfig, RowAction, Site, TelemetryService,
    TracingSink,
};
use portal_options::{reconcile, InsertionPolicy, OptionList, Record, VirtualEntry, VirtualKind};
use serde_json::{json, Map, Value};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) struct OptionsArgs {
    pub(crate) records: PathBuf,
    pub(crate) new_name: Option<String>,
    pub(crate) kind: VirtualKind,
    pub(crate) policy: InsertionPolicy,
    pub(crate) json: bool,
}

pub(crate) struct KeyVaultArgs {
    pub(crate) reference: PathBuf,
    pub(crate) site: Option<PathBuf>,
    pub(crate) json: bool,
}

pub(crate) fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PortalConfig> {
    match path {
        Some(path) => PortalConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(PortalConfig::default()),
    }
}

pub(crate) fn parse_kind(value: Option<&str>) -> anyhow::Result<VirtualKind> {
    match value.unwrap_or("plan") {
        "plan" => Ok(VirtualKind::NewPlan),
        "resource-group" => Ok(VirtualKind::NewResourceGroup),
        other => bail!("unknown entry kind '{other}'"),
    }
}

pub(crate) fn parse_policy(value: Option<&str>) -> anyhow::Result<InsertionPolicy> {
    match value.unwrap_or("append") {
        "append" => Ok(InsertionPolicy::Append),
        "prepend-if-empty" => Ok(InsertionPolicy::PrependIfEmpty),
        "prepend" => Ok(InsertionPolicy::Prepend),
        other => bail!("unknown insertion policy '{other}'"),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// ARM-shaped objects to records; a missing `id` becomes an empty one so
/// reconciliation reports it
fn records_from_json(value: Value) -> anyhow::Result<Vec<Record<Value>>> {
    let Value::Array(items) = value else {
        bail!("records file must contain a JSON array");
    };
    Ok(items
        .into_iter()
        .map(|item| {
            let id = item.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
            Record::new(id, name, item)
        })
        .collect())
}

pub(crate) fn run_options(config: &PortalConfig, args: &OptionsArgs) -> anyhow::Result<String> {
    let records = records_from_json(read_json(&args.records)?)?;
    let entry = args
        .new_name
        .as_deref()
        .map(|name| VirtualEntry::new(args.kind, name).with_text(config.format_new(name)));

    let options = reconcile(&records, entry.as_ref(), args.policy)
        .with_context(|| format!("reconciling {}", args.records.display()))?;

    let telemetry = TelemetryService::new(config).with_sink(Arc::new(TracingSink));
    let mut properties = Map::new();
    properties.insert("count".to_string(), json!(options.len()));
    properties.insert("policy".to_string(), json!(args.policy));
    telemetry.track("options-reconciled", Some(properties));

    if args.json {
        return Ok(serde_json::to_string_pretty(&options)?);
    }
    Ok(render_options(&options))
}

/// One line per option: `*` marks the default, `+` a proposed entry
pub(crate) fn render_options(options: &OptionList<Value>) -> String {
    let mut out = String::new();
    for option in options {
        let marker = match (option.is_default(), option.is_virtual()) {
            (true, true) => "*+",
            (true, false) => "* ",
            (false, true) => " +",
            (false, false) => "  ",
        };
        let _ = writeln!(out, "{marker} {}\t{}", option.text(), option.key());
    }
    out.trim_end().to_string()
}

pub(crate) fn run_key_vault(config: &PortalConfig, args: &KeyVaultArgs) -> anyhow::Result<String> {
    let reference: KeyVaultReference = serde_json::from_value(read_json(&args.reference)?)
        .context("invalid Key Vault reference")?;
    let site: Option<Site> = match &args.site {
        Some(path) => Some(serde_json::from_value(read_json(path)?).context("invalid site")?),
        None => None,
    };

    // No lookup service offline: rows are shown without blade links.
    let view = KeyVaultReferenceView::unresolved(reference, config);
    let rows = view.detail_rows(site.as_ref());

    if args.json {
        let value = json!({
            "uris": view.uris(),
            "status": view.reference().status,
            "rows": rows,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    for row in &rows {
        let value = row.value_key.unwrap_or(row.value.as_str());
        let _ = write!(out, "{}: {value}", row.label_key);
        match &row.action {
            Some(RowAction::Href { url, .. }) => {
                let _ = write!(out, " <{url}>");
            }
            Some(RowAction::OpenBlade(link)) => {
                let _ = write!(out, " [{}]", link_name(*link));
            }
            None => {}
        }
        out.push('\n');
    }
    if let Some(uri) = &view.uris().version {
        let _ = writeln!(out, "uri: {uri}");
    } else if let Some(uri) = &view.uris().secret {
        let _ = writeln!(out, "uri: {uri}");
    }
    Ok(out.trim_end().to_string())
}

fn link_name(link: KeyVaultLink) -> &'static str {
    match link {
        KeyVaultLink::Vault => "vault",
        KeyVaultLink::Secret => "secret",
        KeyVaultLink::SecretVersion => "version",
    }
}
