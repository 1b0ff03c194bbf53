//! Signature markup projector
//!
//! [`render`] maps a [`SignatureState`] and an [`IconSet`] to a [`Fragment`].
//! It is a pure function: no I/O, no failure path. Optional lines whose value
//! is empty (or whose switch is off) are simply left out.
//!
//! Layout, left to right: the logo cell, a thin divider painted in the accent
//! color, then the content cell with one table row per line. The optional
//! disclaimer sits in a second table under a rule in the accent color.

use super::color::{resolve_color, DEFAULT_TEXT_COLOR};
use super::markup::{Element, Fragment};
use super::platform::{IconSet, Platform};
use super::state::SignatureState;
use std::borrow::Cow;

/// Element id of the signature root in the preview; stripped on export.
pub const PREVIEW_ID: &str = "signature-preview";

/// Confidentiality paragraph appended when the disclaimer is switched on.
pub const DISCLAIMER_TEXT: &str = "This message contains confidential information and is intended only for the intended recipients. If you are not an intended recipient you should not disseminate, distribute or copy this e-mail. Please notify us immediately by e-mail if you have received this e-mail by mistake and delete this e-mail from your system. E-mail transmission cannot be guaranteed to be secure or error-free as information could be intercepted, corrupted, lost, destroyed, arrive late or incomplete, or contain viruses. Therefore we do not accept liability for any errors or omissions in the contents of this message, which arise as a result of e-mail transmission. If verification is required please request a hard-copy version.";

/// Fixed presentation values injected into [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Accent color used when the state's color is incomplete
    pub default_accent: String,
    /// Color of values, the title and the disclaimer
    pub body_color: String,
    pub font_family: String,
    pub disclaimer: String,
    /// Logo display size in pixels
    pub logo_width: u32,
    pub logo_height: u32,
    /// Maximum width of the whole block in pixels
    pub max_width: u32,
    /// Social icon edge length in pixels
    pub icon_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_accent: DEFAULT_TEXT_COLOR.to_string(),
            body_color: DEFAULT_TEXT_COLOR.to_string(),
            font_family: "Arial, sans-serif".to_string(),
            disclaimer: DISCLAIMER_TEXT.to_string(),
            logo_width: 150,
            logo_height: 50,
            max_width: 550,
            icon_size: 20,
        }
    }
}

/// Link target for the website line: `https://` is added unless the value
/// already starts with `http`.
pub fn website_href(website: &str) -> Cow<'_, str> {
    if website.starts_with("http") {
        Cow::Borrowed(website)
    } else {
        Cow::Owned(format!("https://{}", website))
    }
}

/// Render the signature.
pub fn render(state: &SignatureState, icons: &IconSet, config: &RenderConfig) -> Fragment {
    let accent = resolve_color(state.text_color(), &config.default_accent);
    let ctx = Builder { config, accent };

    let main = Element::table([Element::tr()
        .child(ctx.logo_cell(state))
        .child(ctx.divider_cell())
        .child(ctx.content_cell(state, icons))])
    .css("width", "100%")
    .css("max-width", px(config.max_width));

    let mut root = Element::div()
        .id(PREVIEW_ID)
        .css("font-family", config.font_family.as_str())
        .css("font-size", "12px")
        .css("color", config.body_color.as_str())
        .css("line-height", "1.4")
        .child(main);

    if state.show_disclaimer() {
        root = root.child(ctx.disclaimer());
    }

    Fragment::new(root)
}

fn px(value: u32) -> String {
    format!("{}px", value)
}

/// Shared styling for one render pass.
struct Builder<'a> {
    config: &'a RenderConfig,
    accent: &'a str,
}

impl Builder<'_> {
    // ─────────────────────────────────────────────────────────────────────────
    // Primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// A single-cell row with the given padding.
    fn row(&self, padding: &str, cell: Element) -> Element {
        Element::tr().child(cell.css("padding", padding))
    }

    fn text(&self, text: &str, size: &str, color: &str) -> Element {
        Element::span(text)
            .css("font-family", self.config.font_family.as_str())
            .css("font-size", size)
            .css("color", color)
    }

    /// Bold field label in the accent color, e.g. `Office: `.
    fn label(&self, text: &str) -> Element {
        self.text(&format!("{} ", text), "12px", self.accent)
            .css("font-weight", "bold")
    }

    fn link(&self, href: &str, text: &str) -> Element {
        Element::a(href)
            .css("font-family", self.config.font_family.as_str())
            .css("font-size", "12px")
            .css("color", self.config.body_color.as_str())
            .css("text-decoration", "none")
            .text(text)
    }

    fn image(&self, src: String, alt: &str, width: u32, height: u32) -> Element {
        Element::img(src, alt, width, height)
    }

    /// A labelled line: `label` then a plain value.
    fn field_row(&self, label: &str, value: &str) -> Element {
        self.row(
            "0 0 4px 0",
            Element::td()
                .child(self.label(label))
                .child(self.text(value, "12px", &self.config.body_color)),
        )
    }

    /// A labelled line whose value is a link.
    fn link_row(&self, label: &str, link: Element) -> Element {
        self.row("0 0 4px 0", Element::td().child(self.label(label)).child(link))
    }

    /// Top border in the accent color, separating the disclaimer.
    fn rule(&self, element: Element) -> Element {
        element.css("border-top", format!("2px solid {}", self.accent))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────────────────────

    fn logo_cell(&self, state: &SignatureState) -> Element {
        let width = self.config.logo_width;
        Element::td()
            .attr("width", width.to_string())
            .attr("valign", "middle")
            .css("padding", "0 15px 0 0")
            .child(
                self.image(
                    state.company_logo().src(),
                    "Company Logo",
                    width,
                    self.config.logo_height,
                )
                .css("max-width", px(width))
                .css("height", "auto"),
            )
    }

    fn divider_cell(&self) -> Element {
        Element::td()
            .attr("width", "2")
            .css("width", "2px")
            .css("background-color", self.accent)
            .css("padding", "0")
            .nbsp()
    }

    fn content_cell(&self, state: &SignatureState, icons: &IconSet) -> Element {
        let mut rows = vec![self.row(
            "0 0 4px 0",
            Element::td().child(
                self.text(state.full_name(), "16px", self.accent)
                    .css("font-weight", "bold"),
            ),
        )];

        if !state.job_title().is_empty() {
            rows.push(self.row(
                "0 0 8px 0",
                Element::td().child(self.text(
                    state.job_title(),
                    "12px",
                    &self.config.body_color,
                )),
            ));
        }

        if state.office_phone_visible() {
            rows.push(self.field_row("Office:", state.office_phone()));
        }

        if state.mobile_phone_visible() {
            rows.push(self.field_row("Mobile:", state.mobile_phone()));
        }

        if !state.email().is_empty() {
            let href = format!("mailto:{}", state.email());
            rows.push(self.link_row("Email:", self.link(&href, state.email())));
        }

        if !state.website().is_empty() {
            let link = self
                .link(&website_href(state.website()), state.website())
                .attr("target", "_blank")
                .attr("rel", "noreferrer");
            rows.push(self.link_row("Web:", link));
        }

        if let Some(social) = self.social_row(state, icons) {
            rows.push(social);
        }

        Element::td()
            .attr("valign", "top")
            .css("padding", "0 0 0 15px")
            .child(Element::table(rows))
    }

    fn social_row(&self, state: &SignatureState, icons: &IconSet) -> Option<Element> {
        let visible: Vec<Platform> = Platform::ALL
            .into_iter()
            .filter(|p| state.social(*p).is_visible())
            .collect();

        if visible.is_empty() {
            return None;
        }

        let last = visible.len() - 1;
        let size = self.config.icon_size;
        let cells = visible.iter().enumerate().map(|(i, platform)| {
            let padding = if i == last { "0" } else { "0 8px 0 0" };
            Element::td().css("padding", padding).child(
                Element::a(state.social(*platform).url.as_str())
                    .attr("target", "_blank")
                    .attr("rel", "noreferrer")
                    .child(self.image(
                        icons.get(*platform).src(),
                        platform.display_name(),
                        size,
                        size,
                    )),
            )
        });

        let icons_table = Element::table([Element::tr().children(cells)]);
        Some(self.row("10px 0 0 0", Element::td().child(icons_table)))
    }

    fn disclaimer(&self) -> Element {
        let max_width = px(self.config.max_width);
        let paragraph = Element::p(self.config.disclaimer.as_str())
            .css("font-family", self.config.font_family.as_str())
            .css("font-size", "9px")
            .css("color", self.config.body_color.as_str())
            .css("margin", "0")
            .css("line-height", "1.3")
            .css("max-width", max_width.as_str());

        let cell = Element::td().css("padding", "15px 0 0 0").child(paragraph);

        self.rule(
            Element::table([Element::tr().child(cell)])
                .css("width", "100%")
                .css("max-width", max_width)
                .css("margin-top", "15px"),
        )
    }
}
