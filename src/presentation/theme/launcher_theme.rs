use ratatui::style::{Color, Modifier, Style};

use crate::infrastructure::OptionsStore;

/// One of the five editable launcher colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSlot {
    /// Screen background.
    Background,
    /// Button and input borders.
    ButtonBorder,
    /// Hovered button fill.
    ButtonHighlight,
    /// Idle button text.
    ButtonFore,
    /// Selected button text.
    ButtonForeActive,
}

impl ThemeSlot {
    /// All slots in display order.
    pub const ALL: [Self; 5] = [
        Self::Background,
        Self::ButtonBorder,
        Self::ButtonHighlight,
        Self::ButtonFore,
        Self::ButtonForeActive,
    ];

    /// Option key the colour is persisted under.
    #[must_use]
    pub const fn option_key(self) -> &'static str {
        match self {
            Self::Background => "launcher-back-col",
            Self::ButtonBorder => "launcher-btn-border-col",
            Self::ButtonHighlight => "launcher-btn-highlight-inactive-col",
            Self::ButtonFore => "launcher-btn-fore-inactive-col",
            Self::ButtonForeActive => "launcher-btn-fore-active-col",
        }
    }

    /// Label shown on the colours screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::ButtonBorder => "Button border",
            Self::ButtonHighlight => "Button highlight",
            Self::ButtonFore => "Button",
            Self::ButtonForeActive => "Active button",
        }
    }
}

/// Launcher colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherTheme {
    colours: [[u8; 3]; 5],
}

impl Default for LauncherTheme {
    fn default() -> Self {
        Self {
            colours: [
                [153, 127, 172],
                [97, 81, 110],
                [189, 168, 206],
                [141, 114, 165],
                [162, 131, 186],
            ],
        }
    }
}

impl LauncherTheme {
    /// Loads colours from options, keeping defaults for missing or malformed entries.
    #[must_use]
    pub fn load(options: &OptionsStore) -> Self {
        let mut theme = Self::default();
        for slot in ThemeSlot::ALL {
            if let Some(rgb) = options.get_colour(slot.option_key()) {
                theme.set(slot, rgb);
            }
        }
        theme
    }

    /// Writes every colour to options.
    pub fn save(&self, options: &mut OptionsStore) {
        for slot in ThemeSlot::ALL {
            options.set_colour(slot.option_key(), self.get(slot));
        }
    }

    /// Returns a colour.
    #[must_use]
    pub const fn get(&self, slot: ThemeSlot) -> [u8; 3] {
        self.colours[slot as usize]
    }

    /// Replaces a colour.
    pub const fn set(&mut self, slot: ThemeSlot, rgb: [u8; 3]) {
        self.colours[slot as usize] = rgb;
    }

    fn colour(&self, slot: ThemeSlot) -> Color {
        let [r, g, b] = self.get(slot);
        Color::Rgb(r, g, b)
    }

    /// Screen background style.
    #[must_use]
    pub fn background(&self) -> Style {
        Style::default()
            .bg(self.colour(ThemeSlot::Background))
            .fg(Color::White)
    }

    /// Border style for buttons and inputs.
    #[must_use]
    pub fn border(&self, selected: bool) -> Style {
        let style = Style::default().fg(self.colour(ThemeSlot::ButtonBorder));
        if selected {
            style.fg(Color::White)
        } else {
            style
        }
    }

    /// Button body style.
    #[must_use]
    pub fn button(&self, hovered: bool, selected: bool) -> Style {
        let fill = if hovered {
            ThemeSlot::ButtonHighlight
        } else {
            ThemeSlot::ButtonFore
        };
        let style = Style::default().bg(self.colour(fill)).fg(Color::White);
        if selected {
            style
                .bg(self.colour(ThemeSlot::ButtonForeActive))
                .add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Text input body style.
    #[must_use]
    pub fn input(&self) -> Style {
        Style::default().bg(Color::White).fg(Color::Black)
    }

    /// Hint text inside empty inputs.
    #[must_use]
    pub fn hint(&self) -> Style {
        Style::default().bg(Color::White).fg(Color::Gray)
    }
}
