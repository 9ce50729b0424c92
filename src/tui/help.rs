//! Help text content for the help modal

/// Get keybinding help text
pub fn get_help_text() -> Vec<String> {
    vec![
        "Entry:",
        "  0-9 .        Digits and decimal point (',' also works)",
        "  + - * x /    Operators",
        "  = / Enter    Equals",
        "  Backspace    Delete last digit",
        "  n / F9       Change sign",
        "  %            Percent",
        "  r            Square root",
        "",
        "Clearing:",
        "  c / Delete   Clear entry (C)",
        "  Esc          All clear (AC), memory is kept",
        "",
        "Memory and totals:",
        "  C-l          MC  memory clear",
        "  C-r          MR  memory recall",
        "  C-p          M+  add to memory",
        "  C-q          M-  subtract from memory",
        "  g            GT  grand total recall",
        "",
        "Tax:",
        "  ]            TAX+  add tax",
        "  [            TAX-  remove tax",
        "  t            Set tax rate",
        "",
        "Other:",
        "  d            Toggle seven-segment / text display",
        "  l            Toggle light / dark theme",
        "  y            Copy value to clipboard",
        "  ? / F1       This help",
        "  q / C-c      Quit",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Get general help text
pub fn get_about_help() -> Vec<String> {
    vec![
        "About Deskcalc",
        "",
        "A desk calculator. Operators chain left to right: 2 + 3 × 4 = 20.",
        "Each = adds its result to the grand total (GT).",
        "The display shows an error after a division by zero or an",
        "out-of-range result, and clears itself shortly after.",
        "",
        "Press Esc or q to close",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Number of lines the help overlay shows: the about text, a blank
/// separator, then the key listing.
pub fn help_line_count() -> usize {
    get_about_help().len() + 1 + get_help_text().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_line_is_indented() {
        let lines = get_help_text();
        for line in lines.iter().filter(|line| !line.is_empty()) {
            assert!(line.starts_with("  ") || line.ends_with(':'), "{line}");
        }
        assert_eq!(
            help_line_count(),
            get_about_help().len() + 1 + lines.len()
        );
    }
}
