use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub wind: Srgba<f64>,
    pub boat: Srgba<f64>,
    pub apparent: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub track: Srgba<f64>,
    pub rose: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            wind: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.21, 0.52, 0.89, 1.0),
                None,
            ),
            boat: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.15, 0.64, 0.41, 1.0),
                None,
            ),
            apparent: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.90, 0.45, 0.10, 1.0),
                None,
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            track: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.35),
                Some(0.25),
            ),
            rose: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.3, 0.3, 0.3, 0.6),
                Some(0.6),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                None,
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

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.apparent-canvas {
    background-color: @theme_base_color;
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
