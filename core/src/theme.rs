//! Light/dark appearance, handed to the renderer as a value.

/// 24-bit colour, kept renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
    /// Background of completed rows.
    pub done: Rgb,
    pub muted: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

const LIGHT: Palette = Palette {
    foreground: Rgb(0x00, 0x00, 0x00),
    background: Rgb(0xff, 0xff, 0xff),
    done: Rgb(0xe0, 0xff, 0xe0),
    muted: Rgb(0x66, 0x66, 0x66),
};

const DARK: Palette = Palette {
    foreground: Rgb(0xff, 0xff, 0xff),
    background: Rgb(0x12, 0x12, 0x12),
    done: Rgb(0x1e, 0x3a, 0x1e),
    muted: Rgb(0xaa, 0xaa, 0xaa),
};

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    /// Label of the toggle control: names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "☾ Dark",
            Theme::Dark => "☀ Light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn dark_palette_inverts_light() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.background, Rgb(255, 255, 255));
        assert_eq!(dark.background, Rgb(0x12, 0x12, 0x12));
        assert_eq!(light.foreground, Rgb(0, 0, 0));
        assert_eq!(dark.foreground, light.background);
    }

    #[test]
    fn label_names_the_other_theme() {
        assert_eq!(Theme::Light.toggle_label(), "☾ Dark");
        assert_eq!(Theme::Dark.toggle_label(), "☀ Light");
    }
}
