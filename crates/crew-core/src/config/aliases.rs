//! Identity alias resolution
//!
//! Aliases let a short role-based name stand in for an actual inbox
//! identity, e.g. `arch` for `team-lead` or `dev` for a specific
//! worker. Configured in `.crew.toml` under `[aliases]`:
//!
//! ```toml
//! [aliases]
//! arch = "team-lead"
//! dev = "fixer-1"
//! ```
//!
//! Tables from multiple sources layer the same way the rest of config
//! resolution does: a repo-local `.crew.toml` can add or override
//! entries from the global one without restating them.

use std::collections::HashMap;

/// Resolve an identity through the alias table.
///
/// If `name` matches a key in `aliases`, returns the corresponding value.
/// Otherwise returns the original name unchanged (pass-through).
///
/// Alias resolution is case-sensitive and non-recursive: if the resolved
/// value is itself an alias key it is NOT resolved further.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use crew_core::config::resolve_alias;
///
/// let mut aliases = HashMap::new();
/// aliases.insert("arch".to_string(), "team-lead".to_string());
///
/// assert_eq!(resolve_alias("arch", &aliases), "team-lead");
/// assert_eq!(resolve_alias("unknown", &aliases), "unknown");
/// ```
pub fn resolve_alias(name: &str, aliases: &HashMap<String, String>) -> String {
    aliases.get(name).cloned().unwrap_or_else(|| name.to_string())
}

/// Layer a more specific alias table (e.g. repo-local `.crew.toml`)
/// over a base one (e.g. global config), following the same
/// precedence order as the rest of config resolution: the more
/// specific source wins key-by-key, and keys only the base defines
/// still come through.
pub fn merge_aliases(
    base: &HashMap<String, String>,
    overlay: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Every alias key that currently resolves to `target`, sorted for
/// stable display (e.g. a `crew config` listing showing "arch, lead ->
/// team-lead" rather than scattering `target`'s aliases across the
/// output in hash order).
pub fn aliases_for<'a>(target: &str, aliases: &'a HashMap<String, String>) -> Vec<&'a str> {
    let mut names: Vec<&str> =
        aliases.iter().filter(|(_, v)| v.as_str() == target).map(|(k, _)| k.as_str()).collect();
    names.sort_unstable();
    names
}
