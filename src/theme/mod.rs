use cursive::theme::{BorderStyle, Palette, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeKind {
    Dark,
    Light,
}

pub fn get_theme(kind: ThemeKind) -> Theme {
    match kind {
        ThemeKind::Dark => dark_theme(),
        ThemeKind::Light => light_theme(),
    }
}

fn dark_theme() -> Theme {
    Theme {
        palette: {
            use cursive::theme::BaseColor::*;
            use cursive::theme::PaletteColor::*;

            let mut palette = Palette::default();

            palette[Background] = Black.dark();
            palette[Shadow] = Black.light();
            palette[View] = Black.dark();

            palette[Primary] = White.dark();
            palette[Secondary] = Black.light();
            palette[Tertiary] = Black.light();

            palette[TitlePrimary] = Cyan.light();
            palette[TitleSecondary] = Yellow.light();

            palette[Highlight] = Cyan.dark();
            palette[HighlightInactive] = Black.dark();
            palette[HighlightText] = White.light();

            palette
        },
        shadow: false,
        borders: BorderStyle::Simple,
    }
}

fn light_theme() -> Theme {
    Theme {
        palette: {
            use cursive::theme::BaseColor::*;
            use cursive::theme::PaletteColor::*;

            let mut palette = Palette::default();

            palette[Background] = White.light();
            palette[Shadow] = Black.light();
            palette[View] = White.light();

            palette[Primary] = Black.dark();
            palette[Secondary] = Blue.dark();
            palette[Tertiary] = Black.light();

            palette[TitlePrimary] = Blue.dark();
            palette[TitleSecondary] = Magenta.dark();

            palette[Highlight] = Blue.dark();
            palette[HighlightInactive] = White.dark();
            palette[HighlightText] = White.light();

            palette
        },
        shadow: false,
        borders: BorderStyle::Simple,
    }
}

#[cfg(test)]
mod tests {
    use cursive::theme::{BaseColor, Color, PaletteColor};

    use super::*;

    #[test]
    fn test_every_kind_has_a_theme() {
        let backgrounds: Vec<_> = [ThemeKind::Dark, ThemeKind::Light]
            .into_iter()
            .map(|kind| get_theme(kind).palette[PaletteColor::Background])
            .collect();
        assert_eq!(
            backgrounds,
            vec![
                Color::Dark(BaseColor::Black),
                Color::Light(BaseColor::White)
            ]
        );
    }
}
