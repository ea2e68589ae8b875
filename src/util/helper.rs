// src/util/helper.rs

/// Ensure a vector of strings contains only integers
pub fn ensure_int_vector(vec: &[String]) -> Option<Vec<i32>> {
    vec.iter()
        .map(|s| s.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map(|mut v| {
            v.sort();
            v
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_numeric_strings_when_ensured_then_sorted_ints() {
        let input = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        assert_eq!(ensure_int_vector(&input), Some(vec![1, 2, 3]));
    }

    #[test]
    fn given_non_numeric_string_when_ensured_then_none() {
        let input = vec!["1".to_string(), "x".to_string()];
        assert_eq!(ensure_int_vector(&input), None);
    }
}
