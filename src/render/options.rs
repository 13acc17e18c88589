use crate::foundation::core::Rgba8;

/// Accent color used for the frame, lit cells and labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    #[default]
    White,
    Ember,
}

impl Accent {
    pub const WHITE: Rgba8 = Rgba8::WHITE;
    pub const EMBER: Rgba8 = Rgba8::opaque(0xff, 0x40, 0x00);

    pub fn color(self) -> Rgba8 {
        match self {
            Accent::White => Self::WHITE,
            Accent::Ember => Self::EMBER,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Accent::White => Accent::Ember,
            Accent::Ember => Accent::White,
        }
    }
}

/// Options for the full composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayOptions {
    pub accent: Accent,
    pub show_grid: bool,
}

/// Which layers a diagram tile draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramMode {
    Squares,
    Diamonds,
    Combined,
}

impl DiagramMode {
    pub const ALL: [DiagramMode; 3] = [
        DiagramMode::Squares,
        DiagramMode::Diamonds,
        DiagramMode::Combined,
    ];

    pub fn draws_squares(self) -> bool {
        !matches!(self, DiagramMode::Diamonds)
    }

    pub fn draws_diamonds(self) -> bool {
        !matches!(self, DiagramMode::Squares)
    }

    /// Fill for an unlit diamond: dark grey when diamonds are shown alone so the grid stays
    /// readable, black otherwise.
    pub fn diamond_off_color(self) -> Rgba8 {
        match self {
            DiagramMode::Diamonds => Rgba8::grey(30),
            _ => Rgba8::BLACK,
        }
    }
}
