//! Semantic styling on top of the console crate

use console::style;

/// Applies semantic colors when enabled, plain text otherwise
#[derive(Debug, Clone, Copy)]
pub struct StyleManager {
    colors: bool,
}

impl StyleManager {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Styling with colors disabled
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    pub fn style_success(&self, text: &str) -> String {
        self.paint(text, |s| s.green())
    }

    pub fn style_error(&self, text: &str) -> String {
        self.paint(text, |s| s.red())
    }

    pub fn style_warning(&self, text: &str) -> String {
        self.paint(text, |s| s.yellow())
    }

    pub fn style_info(&self, text: &str) -> String {
        self.paint(text, |s| s.cyan())
    }

    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(text, |s| s.bold())
    }

    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(text, |s| s.dim())
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success("✓"), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error("✗"), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning("!"), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info("→"), message)
    }

    fn paint<F>(&self, text: &str, apply: F) -> String
    where
        F: FnOnce(console::StyledObject<&str>) -> console::StyledObject<&str>,
    {
        if !self.colors {
            return text.to_string();
        }
        apply(style(text).force_styling(true)).to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}
