use once_cell::sync::Lazy;
use regex::Regex;

/// Rewrites applied to a composed amount, strictly in this order. A lone
/// 零 yuan ("零元整") has nothing before it and is left alone.
static REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"零{2,}", "零"),
        (r"([^零])零元", "${1}元"),
        (r"零角", "角"),
        (r"零分", "分"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid normalization regex"),
            replacement,
        )
    })
    .collect()
});

pub fn normalize_amount(text: &str) -> String {
    REWRITES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_zero_runs_before_unit_rules() {
        assert_eq!(normalize_amount("壹万零零零壹元整"), "壹万零壹元整");
        assert_eq!(normalize_amount("壹拾零零元整"), "壹拾元整");
    }

    #[test]
    fn drops_zero_before_unit_markers() {
        assert_eq!(normalize_amount("壹拾零元整"), "壹拾元整");
        assert_eq!(normalize_amount("壹元零角"), "壹元角");
        assert_eq!(normalize_amount("壹元伍角零分"), "壹元伍角分");
    }

    #[test]
    fn keeps_zero_yuan_amount() {
        assert_eq!(normalize_amount("零元整"), "零元整");
    }

    #[test]
    fn keeps_zero_before_numerals() {
        assert_eq!(normalize_amount("壹元零伍分"), "壹元零伍分");
        assert_eq!(normalize_amount("零伍分"), "零伍分");
    }
}
