//! Signature preview panel
//!
//! Paints a [`Fragment`] directly with egui widgets, reading the same inline
//! styles the exported HTML carries: text color, size and weight, cell
//! padding, the accent divider and rule, and image boxes. The panel can also
//! show the HTML source, either as exported or with the preview ids.
//!
//! Remote images are not fetched. Embedded raster images are decoded when the
//! fragment changes and kept as textures until the next change; everything
//! else is drawn as a labelled box of the declared size.

use crate::signature::{Element, Fragment, Node, Tag};
use crate::theme::PreviewColors;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui, Vec2};
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Requests raised from the preview header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOutput {
    pub copy_requested: bool,
    pub save_requested: bool,
}

/// Which markup the source view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SourceView {
    #[default]
    Hidden,
    /// What is copied and saved
    Export,
    /// With element ids, as used by the preview
    Preview,
}

/// Decoded image for one `img` of the fragment, in document order.
struct PreviewImage {
    src: String,
    texture: Option<egui::TextureHandle>,
}

/// Preview panel state.
#[derive(Default)]
pub struct SignaturePreview {
    source: SourceView,
    /// One entry per `img` of the last synced fragment
    images: Vec<PreviewImage>,
    /// The fragment changed since `images` was built
    images_stale: bool,
}

impl SignaturePreview {
    pub fn new() -> Self {
        Self {
            images_stale: true,
            ..Self::default()
        }
    }

    /// Rebuild the image textures on the next `show`.
    pub fn invalidate_images(&mut self) {
        self.images_stale = true;
    }

    /// Rebuild `images` from the fragment. Textures whose `src` is still
    /// present are reused; the rest are dropped.
    fn sync_images(&mut self, ctx: &egui::Context, fragment: &Fragment) {
        let mut previous = std::mem::take(&mut self.images);
        self.images = fragment
            .root()
            .find_all(&|e: &Element| e.tag() == Tag::Img)
            .into_iter()
            .enumerate()
            .map(|(index, img)| {
                let src = img.get_attr("src").unwrap_or_default();
                let texture = match previous.iter().position(|p| p.src == src) {
                    Some(pos) => previous.swap_remove(pos).texture,
                    None => decode_texture(ctx, src, index),
                };
                PreviewImage {
                    src: src.to_string(),
                    texture,
                }
            })
            .collect();
        self.images_stale = false;
        debug!(
            "Preview images synced: {} kept, {} dropped",
            self.images.len(),
            previous.len()
        );
    }

    /// Show the preview with its header buttons.
    pub fn show(&mut self, ui: &mut Ui, fragment: &Fragment, colors: &PreviewColors) -> PreviewOutput {
        let mut output = PreviewOutput::default();
        if self.images_stale {
            self.sync_images(ui.ctx(), fragment);
        }

        ui.horizontal(|ui| {
            ui.heading("Signature Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("💾 Save HTML…")
                    .on_hover_text("Save the signature as a standalone HTML file")
                    .clicked()
                {
                    output.save_requested = true;
                }
                if ui
                    .button("📋 Copy HTML")
                    .on_hover_text("Copy the signature for pasting into Outlook")
                    .clicked()
                {
                    output.copy_requested = true;
                }
                let showing = self.source != SourceView::Hidden;
                if ui.selectable_label(showing, "</> Source").clicked() {
                    self.source = if showing {
                        SourceView::Hidden
                    } else {
                        SourceView::Export
                    };
                }
            });
        });

        ui.add_space(8.0);

        egui::Frame::none()
            .fill(colors.canvas)
            .stroke(Stroke::new(1.0, colors.canvas_border))
            .rounding(4.0)
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.spacing_mut().item_spacing = Vec2::ZERO;
                let mut painter = FragmentPainter {
                    colors,
                    images: &self.images,
                    next_image: 0,
                };
                painter.element(ui, fragment.root(), InlineStyle::default());
            });

        if self.source != SourceView::Hidden {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.source, SourceView::Export, "As exported");
                ui.selectable_value(&mut self.source, SourceView::Preview, "With preview ids");
            });
            let html = match self.source {
                SourceView::Preview => fragment.preview_html(),
                _ => fragment.export_html(),
            };
            egui::ScrollArea::vertical()
                .id_source("signature_source")
                .max_height(220.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut html.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
        }

        output
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Style
// ─────────────────────────────────────────────────────────────────────────────

/// Text style inherited down the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct InlineStyle {
    color: Color32,
    size: f32,
    bold: bool,
}

impl Default for InlineStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x47, 0x40, 0x3d),
            size: 12.0,
            bold: false,
        }
    }
}

impl InlineStyle {
    /// Apply an element's own declarations on top of the inherited style.
    fn inherit(self, element: &Element) -> Self {
        let style = element.style();
        Self {
            color: style
                .get("color")
                .and_then(parse_hex_color)
                .unwrap_or(self.color),
            size: style.get("font-size").and_then(parse_px).unwrap_or(self.size),
            bold: style
                .get("font-weight")
                .map(|w| w == "bold")
                .unwrap_or(self.bold),
        }
    }

    fn rich_text(&self, text: &str) -> RichText {
        let rich = RichText::new(text).color(self.color).size(self.size);
        if self.bold {
            rich.strong()
        } else {
            rich
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment Painter
// ─────────────────────────────────────────────────────────────────────────────

struct FragmentPainter<'a> {
    colors: &'a PreviewColors,
    images: &'a [PreviewImage],
    /// Index of the next `img` in document order
    next_image: usize,
}

impl FragmentPainter<'_> {
    fn element(&mut self, ui: &mut Ui, element: &Element, inherited: InlineStyle) {
        let style = inherited.inherit(element);

        if let Some(space) = element.style().get("margin-top").and_then(parse_px) {
            ui.add_space(space);
        }
        if let Some((width, color)) = element.style().get("border-top").and_then(parse_border) {
            self.rule(ui, element, width, color);
        }

        let margin = element
            .style()
            .get("padding")
            .map(parse_padding)
            .unwrap_or_default();

        egui::Frame::none().inner_margin(margin).show(ui, |ui| {
            match element.tag() {
                Tag::Tr => self.row(ui, element, style),
                Tag::Img => self.image(ui, element, None),
                Tag::A if element.text_content().is_empty() => {
                    let href = element.get_attr("href").unwrap_or_default().to_string();
                    for child in element.child_elements() {
                        if child.tag() == Tag::Img {
                            self.image(ui, child, Some(&href));
                        }
                    }
                }
                _ if is_inline_run(element) => {
                    ui.horizontal_wrapped(|ui| self.inline(ui, element, style));
                }
                _ => {
                    ui.vertical(|ui| {
                        for child in element.child_elements() {
                            self.element(ui, child, style);
                        }
                    });
                }
            }
        });
    }

    /// Lay cells out left to right. Cells with a background color are filled
    /// over the full row height once the row has been measured.
    fn row(&mut self, ui: &mut Ui, tr: &Element, style: InlineStyle) {
        let mut fills = Vec::new();

        let row = ui.horizontal_top(|ui| {
            for cell in tr.child_elements() {
                match cell.style().get("background-color").and_then(parse_hex_color) {
                    Some(color) => {
                        let width = cell
                            .style()
                            .get("width")
                            .and_then(parse_px)
                            .unwrap_or(2.0);
                        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 1.0), Sense::hover());
                        fills.push((rect.x_range(), color));
                    }
                    None => self.element(ui, cell, style),
                }
            }
        });

        let height = row.response.rect.y_range();
        for (x_range, color) in fills {
            ui.painter()
                .rect_filled(egui::Rect::from_x_y_ranges(x_range, height), 0.0, color);
        }
    }

    /// Text, spans and links of a single line.
    fn inline(&mut self, ui: &mut Ui, element: &Element, style: InlineStyle) {
        for node in element.child_nodes() {
            match node {
                Node::Text(text) => {
                    ui.label(style.rich_text(text));
                }
                Node::NonBreakingSpace => {
                    ui.label(style.rich_text("\u{a0}"));
                }
                Node::Element(child) if child.tag() == Tag::A => {
                    let href = child.get_attr("href").unwrap_or_default();
                    let link_style = InlineStyle {
                        color: self.colors.link,
                        ..style.inherit(child)
                    };
                    ui.add(egui::Hyperlink::from_label_and_url(
                        link_style.rich_text(&child.text_content()),
                        href,
                    ))
                    .on_hover_text(href);
                }
                Node::Element(child) => self.inline(ui, child, style.inherit(child)),
            }
        }
    }

    fn rule(&self, ui: &mut Ui, element: &Element, width: f32, color: Color32) {
        let max = element
            .style()
            .get("max-width")
            .and_then(parse_px)
            .unwrap_or(f32::INFINITY);
        let size = Vec2::new(ui.available_width().min(max), width);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        ui.painter().rect_filled(rect, 0.0, color);
    }

    fn image(&mut self, ui: &mut Ui, img: &Element, href: Option<&str>) {
        let width = attr_px(img, "width").unwrap_or(20.0);
        let height = attr_px(img, "height").unwrap_or(20.0);
        let src = img.get_attr("src").unwrap_or_default();
        let alt = img.get_attr("alt").unwrap_or_default();

        let response = match self.texture_for(src) {
            Some(texture) => {
                let size = fit_within(texture.size_vec2(), Vec2::new(width, height));
                ui.add(
                    egui::Image::from_texture(egui::load::SizedTexture::new(texture.id(), size))
                        .sense(Sense::click()),
                )
            }
            None => {
                let (rect, response) =
                    ui.allocate_exact_size(Vec2::new(width, height), Sense::click());
                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, self.colors.image_placeholder);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    initials(alt, width),
                    egui::FontId::proportional((height * 0.35).clamp(8.0, 14.0)),
                    Color32::from_gray(110),
                );
                response
            }
        };

        let response = response.on_hover_text(match href {
            Some(href) => format!("{}\n{}", alt, href),
            None => alt.to_string(),
        });

        if let Some(href) = href {
            if response.clicked() && !href.is_empty() {
                ui.ctx().open_url(egui::OpenUrl::new_tab(href));
            }
        }
    }

    /// Texture of the next image. Images are painted in document order, the
    /// same order `sync_images` collected them in.
    fn texture_for(&mut self, src: &str) -> Option<egui::TextureHandle> {
        let images = self.images;
        let image = images.get(self.next_image)?;
        self.next_image += 1;
        if image.src.len() != src.len() {
            return None;
        }
        image.texture.clone()
    }
}

/// Decode an embedded raster image into a texture. `None` for anything that
/// is not a decodable `data:` reference.
fn decode_texture(ctx: &egui::Context, src: &str, index: usize) -> Option<egui::TextureHandle> {
    let bytes = decode_data_uri(src)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| warn!("Cannot decode embedded image for preview: {}", e))
        .ok()?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    debug!("Decoded embedded preview image {}x{}", size[0], size[1]);
    Some(ctx.load_texture(
        format!("signature-image-{}", index),
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
        egui::TextureOptions::LINEAR,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// An element whose children are all text or inline elements.
fn is_inline_run(element: &Element) -> bool {
    element.child_nodes().iter().all(|node| match node {
        Node::Text(_) | Node::NonBreakingSpace => true,
        Node::Element(child) => matches!(child.tag(), Tag::Span | Tag::A) && !has_image(child),
    }) && !element.child_nodes().is_empty()
}

fn has_image(element: &Element) -> bool {
    element.find(&|e: &Element| e.tag() == Tag::Img).is_some()
}

fn attr_px(element: &Element, name: &str) -> Option<f32> {
    element.get_attr(name).and_then(|v| v.parse().ok())
}

/// Scale `size` down to fit `bounds`, keeping the aspect ratio.
fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}

/// Short label for an image box: the alt text if it fits, else its initials.
fn initials(alt: &str, width: f32) -> String {
    if width >= 60.0 {
        return alt.to_string();
    }
    alt.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .collect()
}

/// Parse `#RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse `12px` (or a bare `0`).
fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    if value == "0" {
        return Some(0.0);
    }
    value.strip_suffix("px")?.trim().parse().ok()
}

/// Parse a CSS padding shorthand with one, two or four values.
fn parse_padding(value: &str) -> egui::Margin {
    let parts: Vec<f32> = value
        .split_whitespace()
        .map(|p| parse_px(p).unwrap_or(0.0))
        .collect();
    match parts.as_slice() {
        [all] => egui::Margin::same(*all),
        [vertical, horizontal] => egui::Margin::symmetric(*horizontal, *vertical),
        [top, right, bottom, left] => egui::Margin {
            left: *left,
            right: *right,
            top: *top,
            bottom: *bottom,
        },
        _ => egui::Margin::ZERO,
    }
}

/// Parse `2px solid #RRGGBB`.
fn parse_border(value: &str) -> Option<(f32, Color32)> {
    let mut parts = value.split_whitespace();
    let width = parse_px(parts.next()?)?;
    let _style = parts.next()?;
    let color = parse_hex_color(parts.next()?)?;
    Some((width, color))
}

/// Payload bytes of a `data:<mime>;base64,<data>` reference.
fn decode_data_uri(src: &str) -> Option<Vec<u8>> {
    let rest = src.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    if !meta.ends_with(";base64") || meta.starts_with("image/svg") {
        return None;
    }
    STANDARD.decode(data).ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#6FAC43"),
            Some(Color32::from_rgb(0x6f, 0xac, 0x43))
        );
        assert_eq!(parse_hex_color("#47403d"), Some(Color32::from_rgb(0x47, 0x40, 0x3d)));
        assert_eq!(parse_hex_color("6FAC43"), None);
        assert_eq!(parse_hex_color("#6FAC4"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("100%"), None);
    }

    #[test]
    fn test_parse_padding_shorthands() {
        assert_eq!(parse_padding("0"), egui::Margin::ZERO);

        let four = parse_padding("0 15px 0 0");
        assert_eq!(four.right, 15.0);
        assert_eq!(four.left, 0.0);

        let two = parse_padding("4px 8px");
        assert_eq!(two.top, 4.0);
        assert_eq!(two.left, 8.0);
    }

    #[test]
    fn test_parse_border() {
        assert_eq!(
            parse_border("2px solid #6FAC43"),
            Some((2.0, Color32::from_rgb(0x6f, 0xac, 0x43)))
        );
        assert_eq!(parse_border("none"), None);
    }

    #[test]
    fn test_inline_style_inherits_declarations() {
        let span = Element::span("x")
            .css("color", "#ff0000")
            .css("font-size", "16px")
            .css("font-weight", "bold");
        let style = InlineStyle::default().inherit(&span);
        assert_eq!(style.color, Color32::from_rgb(255, 0, 0));
        assert_eq!(style.size, 16.0);
        assert!(style.bold);

        let plain = Element::span("y");
        assert_eq!(style.inherit(&plain), style);
    }

    #[test]
    fn test_decode_data_uri() {
        assert_eq!(decode_data_uri("data:image/png;base64,AQID"), Some(vec![1, 2, 3]));
        assert_eq!(decode_data_uri("data:image/svg+xml;base64,AQID"), None);
        assert_eq!(decode_data_uri("https://cdn.example/icon.png"), None);
    }

    #[test]
    fn test_inline_run_detection() {
        let line = Element::td()
            .child(Element::span("Office: "))
            .child(Element::span("(555) 123-4567"));
        assert!(is_inline_run(&line));

        let icon = Element::td().child(Element::a("https://x.com").child(Element::img("s", "X", 20, 20)));
        assert!(!is_inline_run(&icon));
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let fitted = fit_within(Vec2::new(300.0, 100.0), Vec2::new(150.0, 50.0));
        assert_eq!(fitted, Vec2::new(150.0, 50.0));
        let small = fit_within(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert_eq!(small, Vec2::new(10.0, 10.0));
    }

    fn logo_fragment(src: &str) -> Fragment {
        Fragment::new(Element::div().child(Element::img(src, "Company Logo", 150, 50)))
    }

    #[test]
    fn test_sync_images_drops_images_no_longer_present() {
        let ctx = egui::Context::default();
        let mut preview = SignaturePreview::new();
        assert!(preview.images_stale);

        preview.sync_images(&ctx, &logo_fragment("https://cdn.example/logo.png"));
        assert!(!preview.images_stale);
        assert_eq!(preview.images.len(), 1);
        assert_eq!(preview.images[0].src, "https://cdn.example/logo.png");
        assert!(preview.images[0].texture.is_none());

        preview.invalidate_images();
        assert!(preview.images_stale);
        preview.sync_images(&ctx, &Fragment::new(Element::div()));
        assert!(preview.images.is_empty());
    }

    #[test]
    fn test_painter_hands_out_images_in_order() {
        let images = [
            PreviewImage {
                src: "a.png".to_string(),
                texture: None,
            },
            PreviewImage {
                src: "bb.png".to_string(),
                texture: None,
            },
        ];
        let colors = PreviewColors::default();
        let mut painter = FragmentPainter {
            colors: &colors,
            images: &images,
            next_image: 0,
        };

        assert!(painter.texture_for("a.png").is_none());
        assert!(painter.texture_for("bb.png").is_none());
        assert_eq!(painter.next_image, 2);
        assert!(painter.texture_for("c.png").is_none());
        assert_eq!(painter.next_image, 2);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Company Logo", 150.0), "Company Logo");
        assert_eq!(initials("X (Twitter)", 20.0), "XT");
        assert_eq!(initials("Facebook", 20.0), "F");
    }
}
