//! Paragraph reflow for help bodies.

/// Re-wrap `lines` so that `indent` plus each output line fits `max_width`.
///
/// Returned lines carry no indentation. Blank lines separate paragraphs and
/// are kept as single empty lines. Words are packed greedily; a word longer
/// than the available width sits alone on its line. Input without words, or
/// an indent that leaves no room, comes back unchanged.
pub fn reflow(lines: &[String], indent: &str, max_width: usize) -> Vec<String> {
    let width = max_width.saturating_sub(indent.chars().count());
    if width == 0 || lines.iter().all(|l| l.trim().is_empty()) {
        return lines.to_vec();
    }
    let mut out = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            pack(&paragraph, width, &mut out);
            paragraph.clear();
            out.push(String::new());
        } else {
            paragraph.extend(line.split_whitespace());
        }
    }
    pack(&paragraph, width, &mut out);
    out
}

fn pack(words: &[&str], width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}
