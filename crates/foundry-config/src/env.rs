use std::sync::LazyLock;

use regex::Regex;

/// `{{ env.VAR }}` with an optional `| default("fallback")`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Substitute `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("x") }}` falls back to `x` when `VAR` is unset.
/// Lines starting with `#` are copied untouched, so commented-out settings
/// never require their variables to exist.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    input
        .split_inclusive('\n')
        .map(expand_line)
        .collect::<anyhow::Result<Vec<_>>>()
        .map(|lines| lines.concat())
}

fn expand_line(line: &str) -> anyhow::Result<String> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> anyhow::Result<String> {
    let Some(var) = key.strip_prefix("env.").filter(|var| !var.contains('.')) else {
        anyhow::bail!("unsupported placeholder `{key}`: only `env.` variables are available");
    };

    match (std::env::var(var), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable `{var}` is not set"),
    }
}
