//! Common routines for handling input data.
pub mod scenario;
pub mod well;

use crate::units::Dimensionless;
use anyhow::{Context, Result};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

/// Generate the standard error message prefix for a bad input file
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a TOML file into the specified type
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    toml::from_str(&contents).with_context(|| input_err_msg(file_path))
}

/// Read a fraction, checking that it is between 0 and 1 inclusive
pub fn deserialise_proportion<'de, D>(deserialiser: D) -> Result<Dimensionless, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !(0.0..=1.0).contains(&value) {
        Err(serde::de::Error::custom("Value must be between 0 and 1"))?;
    }

    Ok(Dimensionless(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: String,
        value: f64,
    }

    #[test]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("record.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id = \"a\"\nvalue = 1.5").unwrap();
        }

        let record: Record = read_toml(&file_path).unwrap();
        assert_eq!(
            record,
            Record {
                id: "a".to_string(),
                value: 1.5
            }
        );
    }

    #[test]
    fn test_read_toml_missing_file() {
        let dir = tempdir().unwrap();
        let result: Result<Record> = read_toml(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Fraction {
        #[serde(deserialize_with = "deserialise_proportion")]
        value: Dimensionless,
    }

    #[test]
    fn test_deserialise_proportion() {
        let fraction: Fraction = toml::from_str("value = 0.12").unwrap();
        assert_eq!(fraction.value, Dimensionless(0.12));

        assert!(toml::from_str::<Fraction>("value = 1.2").is_err());
        assert!(toml::from_str::<Fraction>("value = -0.1").is_err());
    }
}
