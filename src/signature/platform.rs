//! Social media platforms and their icons

use super::media::ImageSource;
use std::collections::BTreeMap;

/// A social media identity slot.
///
/// Variant order is the order icons appear in the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    X,
    Facebook,
    Instagram,
    Google,
    YouTube,
}

impl Platform {
    /// All platforms in display order.
    pub const ALL: [Platform; 5] = [
        Platform::X,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Google,
        Platform::YouTube,
    ];

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::X => "x",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Google => "google",
            Platform::YouTube => "youtube",
        }
    }

    /// Name shown in the form and used as image alt text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::X => "X (Twitter)",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Google => "Google",
            Platform::YouTube => "YouTube",
        }
    }

    /// Icon used until the user picks another one.
    pub fn default_icon_url(&self) -> &'static str {
        self.curated_icon_urls()[0]
    }

    /// The curated icon choices offered for this platform.
    pub fn curated_icon_urls(&self) -> &'static [&'static str] {
        match self {
            Platform::X => &[
                "https://cdn-icons-png.flaticon.com/512/5969/5969020.png",
                "https://cdn-icons-png.flaticon.com/512/124/124021.png",
                "https://cdn-icons-png.flaticon.com/512/3256/3256013.png",
            ],
            Platform::Facebook => &[
                "https://cdn-icons-png.flaticon.com/512/174/174848.png",
                "https://cdn-icons-png.flaticon.com/512/5968/5968764.png",
                "https://cdn-icons-png.flaticon.com/512/733/733547.png",
            ],
            Platform::Instagram => &[
                "https://cdn-icons-png.flaticon.com/512/2111/2111463.png",
                "https://cdn-icons-png.flaticon.com/512/3955/3955024.png",
                "https://cdn-icons-png.flaticon.com/512/174/174855.png",
            ],
            Platform::Google => &[
                "https://cdn-icons-png.flaticon.com/512/2991/2991148.png",
                "https://cdn-icons-png.flaticon.com/512/300/300221.png",
                "https://cdn-icons-png.flaticon.com/512/2875/2875404.png",
            ],
            Platform::YouTube => &[
                "https://cdn-icons-png.flaticon.com/512/1384/1384060.png",
                "https://cdn-icons-png.flaticon.com/512/174/174883.png",
                "https://cdn-icons-png.flaticon.com/512/3670/3670147.png",
            ],
        }
    }

    /// Hint shown in the empty URL field.
    pub fn url_placeholder(&self) -> String {
        format!("{} profile URL", self.display_name())
    }
}

/// Icon image chosen for each platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    icons: BTreeMap<Platform, ImageSource>,
}

impl IconSet {
    /// Icon for `platform`.
    pub fn get(&self, platform: Platform) -> &ImageSource {
        // every platform is inserted by `default()` and never removed
        &self.icons[&platform]
    }

    /// Return a copy of the set with `platform` using `source`.
    #[must_use]
    pub fn with_icon(mut self, platform: Platform, source: ImageSource) -> Self {
        self.icons.insert(platform, source);
        self
    }

    /// Returns `true` if `platform` still uses its default CDN icon.
    pub fn is_default(&self, platform: Platform) -> bool {
        self.get(platform) == &ImageSource::remote(platform.default_icon_url())
    }
}

impl Default for IconSet {
    fn default() -> Self {
        let icons = Platform::ALL
            .into_iter()
            .map(|p| (p, ImageSource::remote(p.default_icon_url())))
            .collect();
        Self { icons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_order_is_fixed() {
        let ids: Vec<_> = Platform::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["x", "facebook", "instagram", "google", "youtube"]);

        let mut sorted = Platform::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Platform::ALL.to_vec());
    }

    #[test]
    fn test_each_platform_has_three_curated_icons() {
        for platform in Platform::ALL {
            let urls = platform.curated_icon_urls();
            assert_eq!(urls.len(), 3, "{:?}", platform);
            assert!(urls.iter().all(|u| u.starts_with("https://")));
        }
    }

    #[test]
    fn test_icon_set_defaults_and_override() {
        let icons = IconSet::default();
        assert_eq!(
            icons.get(Platform::X).src(),
            "https://cdn-icons-png.flaticon.com/512/5969/5969020.png"
        );
        assert!(icons.is_default(Platform::X));

        let icons = icons.with_icon(
            Platform::X,
            ImageSource::remote(Platform::X.curated_icon_urls()[2]),
        );
        assert!(!icons.is_default(Platform::X));
        assert!(icons.is_default(Platform::Facebook));
    }
}
