use regex::Regex;

/// Pre-vectorization text cleanup: case-fold, drop URLs and markup noise,
/// collapse whitespace.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    url_pattern: Regex,
    noise_pattern: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"http\S+").expect("static URL pattern"),
            noise_pattern: Regex::new(r"[^\w\s.,!?;]").expect("static noise pattern"),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lower = text.to_lowercase();
        let without_urls = self.url_pattern.replace_all(&lower, "");
        let without_noise = self.noise_pattern.replace_all(&without_urls, "");

        without_noise.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
