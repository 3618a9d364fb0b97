//! Parsing of explicit flag values coming from configuration and the command line.

use capflags_domain::FlagValue;
use capflags_domain::config::FlagsConfig;
use capflags_registry::{FlagError, Registry};
use tracing::{info, warn};

/// Parses a `NAME:value,NAME:value` list.
///
/// `true` and `false` become booleans, finite numbers become numbers. Empty segments are skipped.
///
/// # Errors
/// Returns [`FlagError::InvalidOverride`] for a segment without `:`, an empty name or a value
/// that is neither a boolean nor a number.
pub fn parse_overrides(query: &str) -> Result<Vec<(String, FlagValue)>, FlagError> {
    query
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_pair(segment, ':'))
        .collect()
}

/// Parses a single `NAME=value` assignment, as given on the command line.
///
/// # Errors
/// Same as [`parse_overrides`].
pub fn parse_assignment(raw: &str) -> Result<(String, FlagValue), FlagError> {
    parse_pair(raw.trim(), '=')
}

fn parse_pair(segment: &str, separator: char) -> Result<(String, FlagValue), FlagError> {
    let Some((name, raw)) = segment.split_once(separator) else {
        return Err(FlagError::InvalidOverride {
            message: format!("expected NAME{separator}value, got '{segment}'").into(),
            context: None,
        });
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(FlagError::InvalidOverride {
            message: format!("missing flag name in '{segment}'").into(),
            context: None,
        });
    }

    let value = FlagValue::parse(raw).ok_or_else(|| FlagError::InvalidOverride {
        message: format!("could not parse value '{}' for flag {name}", raw.trim()).into(),
        context: None,
    })?;

    Ok((name.to_owned(), value))
}

/// Every override the configuration asks for: the `overrides` table first, then `query`.
///
/// Table keys are upper-cased because the configuration loader folds keys to lower case.
///
/// # Errors
/// Returns [`FlagError::InvalidOverride`] if `query` does not parse.
pub fn collect_overrides(flags: &FlagsConfig) -> Result<Vec<(String, FlagValue)>, FlagError> {
    let mut pairs: Vec<_> =
        flags.overrides.iter().map(|(name, value)| (name.to_ascii_uppercase(), *value)).collect();

    if let Some(query) = flags.query.as_deref() {
        pairs.extend(parse_overrides(query)?);
    }

    Ok(pairs)
}

/// Applies the configured overrides to `registry`. Returns how many were applied.
///
/// # Errors
/// Stops at the first override that does not parse or that the registry rejects.
pub fn apply(registry: &Registry, flags: &FlagsConfig) -> Result<usize, FlagError> {
    let pairs = collect_overrides(flags).inspect_err(|err| {
        warn!(error = %err, "Rejected override list");
    })?;

    let applied = registry.apply_overrides(pairs).inspect_err(|err| {
        warn!(error = %err, "Rejected override");
    })?;

    if applied > 0 {
        info!(applied, "Configured overrides applied");
    }
    Ok(applied)
}
