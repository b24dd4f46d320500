/// Normalized edit-distance similarity in `[0, 1]`, where 1 is an exact (case-insensitive) match.
///
/// Lengths are counted in Unicode scalar values; grapheme clusters and
/// normalization forms are not taken into account.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a.to_lowercase(), &b.to_lowercase());
    // Lower-casing can lengthen a string ('İ' -> "i̇"), so the distance may exceed max_len.
    (max_len.saturating_sub(distance)) as f64 / max_len as f64
}

/// Classic Levenshtein distance with unit costs, computed over the full matrix.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            matrix[i][j] = if a[i - 1] == b[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + matrix[i - 1][j - 1]
                    .min(matrix[i][j - 1])
                    .min(matrix[i - 1][j])
            };
        }
    }

    matrix[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn kitten_sitting() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert!(approx(similarity("kitten", "sitting"), 4.0 / 7.0));
    }

    #[test]
    fn both_empty_is_exact_match() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn one_empty_is_no_match() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn identical_strings_score_one() {
        for s in ["Einstein", "pies", "Zürich", "東京"] {
            assert_eq!(similarity(s, s), 1.0, "{s}");
        }
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(similarity("DOG", "dog"), 1.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("Einstein", "Albert Einstein"),
            ("kitten", "sitting"),
            ("Pies", "Dog"),
            ("", "x"),
            ("Straße", "strasse"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        // One substitution over four characters, although 'ü' is two bytes.
        assert!(approx(similarity("über", "uber"), 0.75));
    }

    #[test]
    fn never_negative_when_lowercase_expands() {
        let s = similarity("İ", "a");
        assert!((0.0..=1.0).contains(&s), "got {s}");
    }

    #[test]
    fn substring_title_scores_high() {
        let s = similarity("Einstein", "Albert Einstein");
        assert!(approx(s, 8.0 / 15.0));
    }
}
