use ratatui::style::Color;
use screens::ColorToken;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub error: Color,
    pub tint: Color,
    pub blue: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            panel: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 66, 72),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            error: Color::Rgb(200, 80, 80),
            tint: Color::Rgb(10, 126, 164),
            blue: Color::Rgb(70, 130, 220),
        }
    }
}

impl Theme {
    pub fn color(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Tint => self.tint,
            ColorToken::Gray => self.dim,
            ColorToken::Blue => self.blue,
            ColorToken::White => self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use screens::color_for;

    use super::*;

    #[test]
    fn kinds_map_to_distinct_colors() {
        let theme = Theme::default();
        let income = theme.color(color_for("ingreso"));
        let expense = theme.color(color_for("gasto"));
        let transfer = theme.color(color_for("transferencia"));
        assert_ne!(income, expense);
        assert_ne!(expense, transfer);
        assert_eq!(theme.color(color_for("otro")), theme.text);
    }
}
