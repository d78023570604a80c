// Business rules - prefix strip/apply and per-directory planning

use std::cmp::Ordering;
use std::path::Path;

use crate::domain::model::{ExtensionFilter, Prefix, PlannedRename, PrefixStyle, RenamePlan};


/// Remove a previously applied prefix from a file name.
///
/// Detection is purely syntactic: `7_video.mp4` loses its `7_` even when
/// the number was part of the real title.
pub fn strip_prefix(file_name: &str) -> &str {
    match file_name.split_once('_') {
        Some((token, rest)) if Prefix::detect(token).is_some() => rest,
        _ => file_name,
    }
}

/// Ordinal carried by a file name, as significant digits
fn detected_ordinal(file_name: &str) -> Option<String> {
    let (token, _) = file_name.split_once('_')?;
    Prefix::detect(token).map(|prefix| prefix.ordinal().to_string())
}

/// Processing order within a directory.
///
/// Names carrying an ordinal prefix come first, by the prefix's numeric
/// value, so `10_j` follows `9_i` and a renumbered directory keeps its
/// order on the next run. Ties and unprefixed names are ordered byte-wise.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match (detected_ordinal(a), detected_ordinal(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(&y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Build `{tag}{counter}_{base}` for the configured style
pub fn apply_prefix(style: PrefixStyle, counter: u64, base: &str) -> String {
    format!("{}_{}", style.tag(counter), base)
}

/// New name for a file at a given counter position
pub fn target_name(style: PrefixStyle, counter: u64, file_name: &str) -> String {
    apply_prefix(style, counter, strip_prefix(file_name))
}

/// Plan the renames of one directory from a snapshot of its file names.
///
/// Qualifying names are ordered by [`compare_names`] and numbered from 1;
/// names that fail the filter consume no counter value.
pub fn plan_directory<S: AsRef<str>>(
    directory: &Path,
    file_names: &[S],
    filter: &ExtensionFilter,
    style: PrefixStyle,
) -> RenamePlan {
    let (mut qualifying, mut skipped): (Vec<String>, Vec<String>) = file_names
        .iter()
        .map(|name| name.as_ref().to_string())
        .partition(|name| filter.matches(name));
    qualifying.sort_by(|a, b| compare_names(a, b));
    skipped.sort();

    let renames = qualifying
        .into_iter()
        .zip(1u64..)
        .map(|(from, counter)| {
            let to = target_name(style, counter, &from);
            PlannedRename { counter, from, to }
        })
        .collect();

    RenamePlan {
        directory: directory.to_path_buf(),
        renames,
        skipped,
    }
}
