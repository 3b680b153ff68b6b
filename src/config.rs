use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::debias::{EqualizeOptions, ScalePolicy};

/// Default defining pair for the bias axis (positive pole first).
pub const DEFAULT_AXIS: (&str, &str) = ("woman", "man");

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override these values where both exist.
#[derive(Debug, Clone)]
pub struct Config {
    /// Vector file in the `<word> <v1> ... <vD>` format
    pub vectors_path: PathBuf,
    /// Word whose direction is the positive pole of the axis
    pub axis_positive: String,
    /// Word whose direction is the negative pole of the axis
    pub axis_negative: String,
    /// Where `apply` writes the debiased table
    pub output_path: PathBuf,
    /// Equalization behavior (scale policy and pre-normalization)
    pub equalize: EqualizeOptions,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so this only fails on malformed values.
    pub fn load() -> Result<Self> {
        let vectors_path = env::var_os("DEBIAS_VECTORS")
            .map(PathBuf::from)
            .unwrap_or_else(default_vectors_path);

        let (axis_positive, axis_negative) = match env_value("DEBIAS_AXIS")? {
            Some(spec) => parse_axis(&spec)?,
            None => (DEFAULT_AXIS.0.to_string(), DEFAULT_AXIS.1.to_string()),
        };

        let scale_policy = parse_scale_policy(env_value("DEBIAS_EQUALIZE")?.as_deref())?;
        let normalize = parse_flag(env_value("DEBIAS_NORMALIZE")?.as_deref());

        Ok(Self {
            vectors_path,
            axis_positive,
            axis_negative,
            output_path: env::var_os("DEBIAS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./debiased_vectors.txt")),
            equalize: EqualizeOptions {
                scale_policy,
                normalize,
            },
        })
    }

    /// Check that the vector file exists.
    /// Call this before any operation that loads the table.
    pub fn require_vectors(&self) -> Result<()> {
        if !self.vectors_path.exists() {
            anyhow::bail!(
                "Vector file not found: {}\n\
                 Set DEBIAS_VECTORS in your .env file or pass --vectors <path>.",
                self.vectors_path.display()
            );
        }
        Ok(())
    }
}

/// Returns the default vector file location.
/// Uses the platform data directory: ~/.local/share/debias/vectors.txt on Linux.
pub fn default_vectors_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("debias")
        .join("vectors.txt")
}

/// Parse a `positive,negative` axis pair such as `woman,man`.
pub fn parse_axis(spec: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = spec.splitn(3, ',').map(str::trim).collect();
    match parts.as_slice() {
        [pos, neg] if !pos.is_empty() && !neg.is_empty() => {
            Ok((pos.to_string(), neg.to_string()))
        }
        _ => anyhow::bail!(
            "axis must be written as positive,negative (e.g. woman,man), got {spec:?}"
        ),
    }
}

/// Parse a `DEBIAS_EQUALIZE` value. Unset means strict.
pub fn parse_scale_policy(value: Option<&str>) -> Result<ScalePolicy> {
    match value {
        None | Some("strict") => Ok(ScalePolicy::Strict),
        Some("reflect") => Ok(ScalePolicy::Reflect),
        Some(other) => anyhow::bail!(
            "DEBIAS_EQUALIZE must be \"strict\" or \"reflect\", got {other:?}"
        ),
    }
}

/// Boolean env flag: `1`, `true`, or `yes` turn it on.
pub fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "yes"))
}

/// Read an env var, treating unset as `None` and non-UTF-8 as an error.
fn env_value(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => {
            anyhow::bail!("{name} is not valid UTF-8: {raw:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axis() {
        let (p, n) = parse_axis("woman,man").unwrap();
        assert_eq!((p.as_str(), n.as_str()), ("woman", "man"));
        let (p, n) = parse_axis(" she , he ").unwrap();
        assert_eq!((p.as_str(), n.as_str()), ("she", "he"));
    }

    #[test]
    fn test_parse_axis_rejects_malformed() {
        assert!(parse_axis("woman").is_err());
        assert!(parse_axis("woman,").is_err());
        assert!(parse_axis(",man").is_err());
        assert!(parse_axis("woman,man,extra").is_err());
        assert!(parse_axis("woman,,man").is_err());
    }

    #[test]
    fn test_parse_scale_policy() {
        assert_eq!(parse_scale_policy(None).unwrap(), ScalePolicy::Strict);
        assert_eq!(parse_scale_policy(Some("strict")).unwrap(), ScalePolicy::Strict);
        assert_eq!(parse_scale_policy(Some("reflect")).unwrap(), ScalePolicy::Reflect);
    }

    #[test]
    fn test_parse_scale_policy_rejects_unknown() {
        let err = parse_scale_policy(Some("lenient")).unwrap_err();
        assert!(err.to_string().contains("lenient"), "{err}");
        assert!(parse_scale_policy(Some("Reflect")).is_err());
    }

    #[test]
    fn test_parse_flag() {
        for on in ["1", "true", "yes"] {
            assert!(parse_flag(Some(on)), "{on}");
        }
        for off in ["0", "false", "no", "", "TRUE"] {
            assert!(!parse_flag(Some(off)), "{off}");
        }
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_default_vectors_path_ends_with_file_name() {
        let path = default_vectors_path();
        assert!(path.ends_with("debias/vectors.txt"));
    }
}
