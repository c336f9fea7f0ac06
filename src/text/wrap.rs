use super::measure::Measurer;
use crate::font::Font;

impl Measurer {
    /// Greedy word wrap of `text` into lines no wider than `max_width`.
    ///
    /// Words are separated by any whitespace and joined with single spaces.
    /// A word that alone exceeds `max_width` gets a line of its own. Empty or
    /// whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, font: &Font, max_width: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if self.measure_width(&candidate, font) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
