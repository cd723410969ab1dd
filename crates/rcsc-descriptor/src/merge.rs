//! Overlay merge logic
//!
//! Folds one environment overlay onto a base descriptor:
//! - Scalars: overlay wins when set
//! - Mappings: key-wise union, overlay wins on collision
//! - Rule/plugin lists: overlay appended after base (base runs first)
//! - Nested records: merged field-by-field by the same rules

use std::collections::BTreeMap;

use crate::descriptor::{BuildDescriptor, DevServerOptions, OutputRule};
use crate::partial::{PartialBuildDescriptor, PartialOutputRule};

/// Merge `overlay` onto `base`, producing the effective descriptor.
///
/// `base` is only read; every field of the result is a fresh copy, so the
/// same base can be merged with any number of overlays independently.
pub fn merge(base: &BuildDescriptor, overlay: &PartialBuildDescriptor) -> BuildDescriptor {
    BuildDescriptor {
        entry_points: merge_map(&base.entry_points, &overlay.entry_points),
        output_rule: merge_output(&base.output_rule, overlay.output_rule.as_ref()),
        transform_rules: append(&base.transform_rules, &overlay.transform_rules),
        no_parse: append(&base.no_parse, &overlay.no_parse),
        plugins: append(&base.plugins, &overlay.plugins),
        dev_server: merge_dev_server(base.dev_server.as_ref(), overlay.dev_server.as_ref()),
        devtool: overlay.devtool.or(base.devtool),
    }
}

fn merge_map<V: Clone>(base: &BTreeMap<String, V>, overlay: &BTreeMap<String, V>) -> BTreeMap<String, V> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn append<T: Clone>(base: &[T], overlay: &[T]) -> Vec<T> {
    base.iter().chain(overlay).cloned().collect()
}

fn merge_output(base: &OutputRule, overlay: Option<&PartialOutputRule>) -> OutputRule {
    let Some(overlay) = overlay else {
        return base.clone();
    };
    OutputRule {
        filename_pattern: overlay
            .filename_pattern
            .clone()
            .unwrap_or_else(|| base.filename_pattern.clone()),
        directory: overlay
            .directory
            .clone()
            .unwrap_or_else(|| base.directory.clone()),
    }
}

fn merge_dev_server(
    base: Option<&DevServerOptions>,
    overlay: Option<&DevServerOptions>,
) -> Option<DevServerOptions> {
    match (base, overlay) {
        (Some(base), Some(overlay)) => Some(DevServerOptions {
            content_base: overlay.content_base.clone().or_else(|| base.content_base.clone()),
            stats: overlay.stats.or(base.stats),
            port: overlay.port.or(base.port),
        }),
        (base, overlay) => overlay.or(base).cloned(),
    }
}
