//! Shared display helpers for selection paths, weights and forecast figures

/// Separator placed between labels of a selection path
pub const PATH_SEPARATOR: &str = " / ";

/// Marker standing in for the labels elided from a long selection path
pub const PATH_ELLIPSIS: &str = "...";

/// Reduce a label chain to its display form.
///
/// One label is shown as-is, two are joined, and anything longer keeps only the first and
/// last labels around an ellipsis so the text width stays bounded.
pub fn format_label_chain<S: AsRef<str>>(labels: &[S]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, last] => format!("{}{}{}", first.as_ref(), PATH_SEPARATOR, last.as_ref()),
        [first, .., last] => format!(
            "{}{sep}{}{sep}{}",
            first.as_ref(),
            PATH_ELLIPSIS,
            last.as_ref(),
            sep = PATH_SEPARATOR
        ),
    }
}

/// Format an integer weight as a percentage, e.g. `40%`
pub fn format_weight(weight: impl Into<i64>) -> String {
    format!("{}%", weight.into())
}

/// Format an accuracy figure with one decimal, e.g. `87.6%`
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.1}%", accuracy)
}

/// Format a forecast quantity with thousands separators, e.g. `21,801`
pub fn format_quantity(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod label_chain_tests {
        use super::*;

        #[test]
        fn test_empty_chain() {
            let labels: [&str; 0] = [];
            assert_eq!(format_label_chain(&labels), "");
        }

        #[test]
        fn test_single_label() {
            assert_eq!(format_label_chain(&["华东地区"]), "华东地区");
        }

        #[test]
        fn test_two_labels() {
            assert_eq!(
                format_label_chain(&["华东地区", "华东航空燃料有限公司"]),
                "华东地区 / 华东航空燃料有限公司"
            );
        }

        #[test]
        fn test_three_labels_elides_middle() {
            assert_eq!(
                format_label_chain(&["华东地区", "华东航空燃料有限公司", "上海浦东机场"]),
                "华东地区 / ... / 上海浦东机场"
            );
        }

        #[test]
        fn test_longer_chain_keeps_two_separators() {
            let text = format_label_chain(&["a", "b", "c", "d", "e"]);
            assert_eq!(text, "a / ... / e");
            assert_eq!(text.matches(PATH_SEPARATOR).count(), 2);
        }
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(40), "40%");
        assert_eq!(format_weight(0), "0%");
        assert_eq!(format_weight(-5), "-5%");
    }

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(87.64), "87.6%");
        assert_eq!(format_accuracy(90.0), "90.0%");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0), "0");
        assert_eq!(format_quantity(999), "999");
        assert_eq!(format_quantity(1000), "1,000");
        assert_eq!(format_quantity(21801), "21,801");
        assert_eq!(format_quantity(1234567), "1,234,567");
        assert_eq!(format_quantity(-45000), "-45,000");
    }
}
