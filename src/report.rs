//! Report assembly
//!
//! The field table (icon, label, color per fact) is static data; the
//! configured overrides are folded into a [`Report`], which then renders the
//! resolved facts into the bordered block.

use colored::{Color, Colorize};
use tracing::warn;

use crate::config::DisplayConfig;
use crate::facts::{FactName, HostFact};

const LABEL_WIDTH: usize = 9;
const BORDER_WIDTH: usize = 12;

/// Presentation of one fact
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: FactName,
    pub icon: char,
    pub color: Color,
}

const fn field(name: FactName, icon: char, color: Color) -> FieldSpec {
    FieldSpec { name, icon, color }
}

/// Default field order and appearance (Nerd Font icons)
pub const FIELDS: [FieldSpec; 9] = [
    field(FactName::User, '\u{f007}', Color::Red),
    field(FactName::Os, '\u{f17c}', Color::BrightYellow),
    field(FactName::Model, '\u{f109}', Color::Yellow),
    field(FactName::Cpu, '\u{f2db}', Color::BrightRed),
    field(FactName::Gpu, '\u{f108}', Color::BrightMagenta),
    field(FactName::Packages, '\u{f187}', Color::Green),
    field(FactName::Shell, '\u{f120}', Color::Cyan),
    field(FactName::Memory, '\u{f538}', Color::Blue),
    field(FactName::Uptime, '\u{f017}', Color::Magenta),
];

const SWATCH_ICON: char = '\u{f53f}';

/// Bullets shown in the closing swatch row
const SWATCH: [Color; 7] = [
    Color::Black,
    Color::Red,
    Color::BrightYellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Field layout with user overrides applied
#[derive(Debug, Clone)]
pub struct Report {
    fields: Vec<FieldSpec>,
    icons: bool,
}

impl Report {
    pub fn new(fields: Vec<FieldSpec>, icons: bool) -> Self {
        Self { fields, icons }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        let mut fields = FIELDS.to_vec();

        for (label, color_name) in &display.colors {
            let Some(name) = FactName::from_label(label) else {
                warn!(label = %label, "ignoring color override for unknown field");
                continue;
            };
            match color_name.parse::<Color>() {
                Ok(color) => {
                    if let Some(field) = fields.iter_mut().find(|field| field.name == name) {
                        field.color = color;
                    }
                }
                Err(_) => warn!(label = %label, color = %color_name, "ignoring unknown color"),
            }
        }

        Self::new(fields, display.icons)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Render the bordered block; `facts` are expected in field order
    pub fn render(&self, facts: &[HostFact]) -> String {
        let border = "─".repeat(BORDER_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("╭{}╮\n", border));
        for fact in facts {
            let icon = self
                .fields
                .iter()
                .find(|field| field.name == fact.name)
                .map(|field| field.icon)
                .unwrap_or(' ');
            output.push_str(&self.row(icon, fact.name.label(), &fact.value, Some(fact.color)));
        }
        output.push_str(&format!("├{}┤\n", border));

        let swatch = SWATCH
            .iter()
            .map(|color| "●".color(*color).to_string())
            .chain(std::iter::once("●".to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(&self.row(SWATCH_ICON, "colors", &swatch, None));
        output.push_str(&format!("╰{}╯", border));

        output
    }

    fn row(&self, icon: char, label: &str, value: &str, color: Option<Color>) -> String {
        let icon = if self.icons { icon } else { ' ' };
        let label = format!("{:<width$.width$}", label, width = LABEL_WIDTH);
        let (icon, value) = match color {
            Some(color) => (
                icon.to_string().color(color).to_string(),
                value.color(color).to_string(),
            ),
            None => (icon.to_string(), value.to_string()),
        };

        format!("│ {} {}│ {}\n", icon, label, value)
    }
}
