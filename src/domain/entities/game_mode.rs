//! Game feature modes selectable from the launcher.

/// Feature set the game starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Custom blocks, env changes, longer messages and the rest of the extensions.
    Enhanced,
    /// Classic features with hacks (noclip, fly, speed) enabled.
    ClassicHax,
    /// Only the original classic blocks and features.
    Classic,
}

impl GameMode {
    /// Returns whether the mode restricts the game to classic features.
    #[must_use]
    pub const fn is_classic(self) -> bool {
        !matches!(self, Self::Enhanced)
    }

    /// Boolean options this mode writes.
    #[must_use]
    pub fn option_values(self) -> Vec<(&'static str, bool)> {
        let classic = self.is_classic();
        let mut values = vec![("mode-classic", classic)];
        if classic {
            values.push(("nostalgia-hacks", matches!(self, Self::ClassicHax)));
        }
        values.extend([
            ("nostalgia-classicbg", classic),
            ("nostalgia-customblocks", !classic),
            ("nostalgia-usecpe", !classic),
            ("nostalgia-servertextures", !classic),
            ("nostalgia-classictablist", classic),
            ("nostalgia-classicoptions", classic),
        ]);
        values
    }
}
