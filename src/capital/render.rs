const ZERO: &str = "零";

const DIGITS: [&str; 10] = ["零", "壹", "贰", "叁", "肆", "伍", "陆", "柒", "捌", "玖"];
const UNITS: [&str; 4] = ["", "拾", "佰", "仟"];
const SECTION_UNITS: [&str; 4] = ["", "万", "亿", "兆"];

const GROUP_WIDTH: usize = 4;

/// Renders an ASCII digit string (as produced by `ParsedAmount::parse`) into capital
/// numerals with positional units, e.g. "1024" -> "壹仟零贰拾肆".
pub(crate) fn render_integer(digits: &str) -> String {
    if digits == "0" {
        return ZERO.to_string();
    }

    let mut result = String::new();
    for (section_index, group) in digits.as_bytes().rchunks(GROUP_WIDTH).enumerate() {
        let words = render_group(group);
        if words.is_empty() {
            continue;
        }
        let unit = SECTION_UNITS
            .get(section_index)
            .copied()
            .unwrap_or_default();
        let mut chunk = words;
        chunk.push_str(unit);
        result.insert_str(0, &chunk);
    }

    if result.is_empty() {
        return ZERO.to_string();
    }
    result
}

fn render_group(group: &[u8]) -> String {
    let mut words = String::new();

    for (idx, &byte) in group.iter().enumerate() {
        let digit = usize::from(byte - b'0');
        let position = group.len() - idx - 1;
        if digit != 0 {
            words.push_str(DIGITS[digit]);
            words.push_str(UNITS[position]);
        } else if idx > 0 && group[idx - 1] != b'0' && !words.ends_with(ZERO) {
            words.push_str(ZERO);
        }
    }

    match words.strip_suffix(ZERO) {
        Some(stripped) => stripped.to_string(),
        None => words,
    }
}

/// Renders the tenths and hundredths digits as 角/分. A zero tenths digit
/// followed by a non-zero hundredths digit keeps its 零 ("零伍分"), as
/// written on cheques.
pub(crate) fn render_fraction(digits: &str) -> String {
    let mut values = digits.bytes().map(|b| usize::from(b - b'0'));
    let jiao = values.next().unwrap_or(0);
    let fen = values.next().unwrap_or(0);

    let mut words = String::new();
    if jiao != 0 {
        words.push_str(DIGITS[jiao]);
        words.push('角');
    } else if fen != 0 {
        words.push_str(ZERO);
    }
    if fen != 0 {
        words.push_str(DIGITS[fen]);
        words.push('分');
    }
    words
}
