//! Terminal formatting of the finished commit message.

/// Column at which message lines are wrapped.
pub const WRAP_WIDTH: usize = 70;

/// Word-wrap every line of `message` at `width` columns.
///
/// Blank lines are kept, continuation lines repeat the leading indentation of
/// the line they come from, and a word longer than `width` stays whole on its
/// own line.
pub fn wrap_message(message: &str, width: usize) -> String {
    message
        .lines()
        .flat_map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    let indent_width = indent.chars().count();

    let mut lines = Vec::new();
    let mut current = indent.clone();
    let mut current_width = indent_width;

    for word in line.split_whitespace() {
        let word_width = word.chars().count();
        if current_width > indent_width {
            if current_width + 1 + word_width > width {
                lines.push(std::mem::replace(&mut current, indent.clone()));
                current_width = indent_width;
            } else {
                current.push(' ');
                current_width += 1;
            }
        }
        current.push_str(word);
        current_width += word_width;
    }

    lines.push(current);
    lines
}
