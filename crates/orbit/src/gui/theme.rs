use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub face: Srgba<f64>,
    pub row: Srgba<f64>,
    pub text: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub bubble: Srgba<f64>,
    pub track: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            face: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.05, 0.05, 0.07, 0.92),
                Some(0.92),
            ),
            row: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.16, 0.16, 0.2, 0.6),
                Some(0.6),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                None,
            ),
            accent: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.35, 0.55, 0.95, 0.9),
                Some(0.9),
            ),
            bubble: Self::lookup_color(
                context,
                "theme_unfocused_selected_bg_color",
                Srgba::new(0.25, 0.3, 0.45, 0.85),
                Some(0.85),
            ),
            track: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.5, 0.5, 0.5, 0.3),
                Some(0.3),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Same colour with its alpha scaled by `factor`.
pub fn faded(color: Srgba<f64>, factor: f64) -> Srgba<f64> {
    Srgba::new(color.red, color.green, color.blue, color.alpha * factor)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-window, .orbit-face {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
