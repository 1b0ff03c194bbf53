//! "How to Add to Outlook" panel

use eframe::egui::{RichText, Ui};

/// Steps for installing the copied signature, as (text, emphasized parts).
const OUTLOOK_STEPS: &[&[(&str, bool)]] = &[
    &[
        ("Click the ", false),
        ("Copy HTML", true),
        (" button to copy your signature", false),
    ],
    &[("Open Microsoft Outlook", false)],
    &[
        ("Go to ", false),
        ("File", true),
        (" > ", false),
        ("Options", true),
        (" > ", false),
        ("Mail", true),
        (" > ", false),
        ("Signatures", true),
    ],
    &[("Click ", false), ("New", true), (" to create a new signature", false)],
    &[("Give your signature a name", false)],
    &[
        ("In the edit box, right-click and select ", false),
        ("Paste", true),
        (" (or press Ctrl+V)", false),
    ],
    &[("Click ", false), ("Save", true), (" and then ", false), ("OK", true)],
    &[("Your new signature is now ready to use in Outlook!", false)],
];

/// Show the numbered installation steps.
pub fn show_instructions(ui: &mut Ui) {
    ui.heading("How to Add to Outlook");
    ui.add_space(8.0);

    for (index, step) in OUTLOOK_STEPS.iter().enumerate() {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(format!("{}. ", index + 1));
            for (text, strong) in step.iter() {
                let rich = RichText::new(*text);
                ui.label(if *strong { rich.strong() } else { rich });
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new(
            "If Outlook pastes the raw HTML instead of the formatted signature, switch \
             Settings > Clipboard format to \"Formatted (rich HTML)\", or save the \
             signature as an HTML file and open it in a browser to copy from there.",
        )
        .small()
        .weak(),
    );
}
