use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("invalid seed `{0}`: expected an unsigned integer")]
    NotANumber(String),
    #[error("no seeds given")]
    Empty,
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated seed list.
///
/// # Errors
///
/// Fails on the first token that is not a `u64`, or when the list is empty.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>, SeedError> {
    let seeds = split_csv(s)
        .into_iter()
        .map(|token| token.parse().map_err(|_| SeedError::NotANumber(token)))
        .collect::<Result<Vec<u64>, _>>()?;
    if seeds.is_empty() {
        return Err(SeedError::Empty);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn parse_seeds_accepts_numbers() {
        assert_eq!(parse_seeds("1337, 42"), Ok(vec![1337, 42]));
    }

    #[test]
    fn parse_seeds_rejects_garbage_and_empty() {
        assert_eq!(
            parse_seeds("7,seven"),
            Err(SeedError::NotANumber("seven".to_string()))
        );
        assert_eq!(parse_seeds(" , "), Err(SeedError::Empty));
    }
}
