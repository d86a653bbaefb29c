/// URL keyword → canned passage, checked in order.
const KEYED_PASSAGES: &[(&str, &str)] = &[
    (
        "wikipedia",
        "Wikipedia is a free online encyclopedia containing articles on various topics \
         including science, history, and technology. It provides verified information from \
         reliable sources and is maintained by volunteer editors worldwide.",
    ),
    (
        "python",
        "Python is a high-level programming language known for its readability and \
         versatility. It is widely used for web development, data science, artificial \
         intelligence, and automation. Python supports multiple programming paradigms and \
         has a large standard library.",
    ),
    (
        "britannica",
        "Encyclopedia Britannica provides authoritative reference content across various \
         subjects including science, history, and arts. It offers verified information \
         written by experts and scholars in their respective fields.",
    ),
    (
        "nationalgeographic",
        "National Geographic offers scientific and educational content about animals, \
         nature, and world cultures. It provides well-researched information about wildlife, \
         ecosystems, and environmental science.",
    ),
    (
        "geeksforgeeks",
        "GeeksforGeeks is a computer science portal providing programming tutorials, coding \
         examples, and technical articles. It covers various programming languages and \
         computer science concepts.",
    ),
];

const GENERIC_PASSAGE: &str = "This source provides reliable information on various topics. \
     The content is curated and verified to ensure accuracy and educational value.";

/// Deterministic stand-in text used when a page cannot be fetched or yields
/// too little content. Built once and shared read-only.
#[derive(Clone, Debug)]
pub struct SimulatedPassages {
    keyed: Vec<(String, String)>,
    generic: String,
}

impl SimulatedPassages {
    pub fn new(keyed: Vec<(String, String)>, generic: String) -> Self {
        Self { keyed, generic }
    }

    /// Passage for the first keyword contained in `url`, else the generic one.
    pub fn for_url(&self, url: &str) -> &str {
        self.keyed
            .iter()
            .find(|(keyword, _)| url.contains(keyword.as_str()))
            .map(|(_, passage)| passage.as_str())
            .unwrap_or(&self.generic)
    }
}

impl Default for SimulatedPassages {
    fn default() -> Self {
        Self::new(
            KEYED_PASSAGES
                .iter()
                .map(|(k, p)| (k.to_string(), p.to_string()))
                .collect(),
            GENERIC_PASSAGE.to_string(),
        )
    }
}
