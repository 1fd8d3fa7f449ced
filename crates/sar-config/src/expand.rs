//! Environment variable expansion for configuration values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// Only the braced form is recognized. A bare `$` (as in `$HOME` or `$1`)
/// and an unterminated `${` are kept as literal text.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let reference = &rest[start..=start + len];

        expanded.push_str(&rest[..start]);
        let resolved = shellexpand::env(reference).map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })?;
        expanded.push_str(&resolved);

        rest = &rest[start + len + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}
