//! Shared CLI utilities.

use anyhow::{bail, Result};

/// Group the flattened values of a two-valued repeatable flag into pairs.
pub fn pair_up(values: &[String], flag: &str) -> Result<Vec<(String, String)>> {
    if values.len() % 2 != 0 {
        bail!("{flag} expects pairs of values");
    }
    Ok(values.chunks_exact(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_up() {
        let values: Vec<String> = ["p", "^a$", "lr", "0.1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            pair_up(&values, "--filter-param").expect("pairs"),
            vec![("p".to_string(), "^a$".to_string()), ("lr".to_string(), "0.1".to_string())]
        );
        assert!(pair_up(&values[..3], "--filter-param").is_err());
    }
}
