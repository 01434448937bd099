use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "..";

/// Keeps the front of `s`, ending in `..` when it does not fit in `cols`
/// terminal cells.
pub fn shorten(s: &str, cols: usize) -> String {
    if s.width() <= cols {
        return s.to_string();
    }
    if cols <= ELLIPSIS.len() {
        return ELLIPSIS[..cols].to_string();
    }
    let mut out = take_width(s.chars(), cols - ELLIPSIS.len());
    out.push_str(ELLIPSIS);
    out
}

/// Keeps the tail of `s`, starting with `..` when it does not fit.
pub fn shorten_front(s: &str, cols: usize) -> String {
    if s.width() <= cols {
        return s.to_string();
    }
    if cols <= ELLIPSIS.len() {
        return ELLIPSIS[..cols].to_string();
    }
    let tail: String = take_width(s.chars().rev(), cols - ELLIPSIS.len())
        .chars()
        .rev()
        .collect();
    format!("{ELLIPSIS}{tail}")
}

fn take_width(chars: impl Iterator<Item = char>, budget: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in chars {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
