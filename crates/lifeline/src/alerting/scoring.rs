use regex::Regex;

/// Highest score a single piece of text can accumulate. The detector counts
/// keyword hits and clamps here; `threat_level` on the wire uses the same
/// scale.
pub const MAX_THREAT_SCORE: u8 = 5;

/// Assessment produced for one piece of submitted text. Computed per
/// request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatAssessment {
    pub threat_score: u8,
    pub is_threat: bool,
    pub detected_keywords: Vec<String>,
    pub confidence: f32,
}

/// Keyword scorer over three fixed groups: direct distress, stalking and
/// harassment, isolation. Matches are counted across all groups and summed.
#[derive(Debug)]
pub struct ThreatScorer {
    patterns: Vec<Regex>,
}

const THREAT_PATTERNS: [&str; 3] = [
    r"\b(help|emergency|danger|unsafe|scared|threatened)\b",
    r"\b(following|stalking|harassing)\b",
    r"\b(alone|isolated|trapped)\b",
];

impl Default for ThreatScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreatScorer {
    pub fn new() -> Self {
        let patterns = THREAT_PATTERNS
            .iter()
            .map(|group| Regex::new(group).expect("threat pattern compiles"))
            .collect();
        Self { patterns }
    }

    /// Score free text. Pure; empty or keyword-free input yields the zero
    /// assessment.
    pub fn score(&self, text: &str) -> ThreatAssessment {
        let haystack = text.to_lowercase();

        let mut detected_keywords = Vec::new();
        for pattern in &self.patterns {
            for hit in pattern.find_iter(&haystack) {
                detected_keywords.push(hit.as_str().to_string());
            }
        }

        let threat_score = detected_keywords.len().min(usize::from(MAX_THREAT_SCORE)) as u8;

        ThreatAssessment {
            threat_score,
            is_threat: threat_score > 0,
            detected_keywords,
            confidence: (f32::from(threat_score) * 0.2).min(1.0),
        }
    }
}

const SAFETY_TIPS: [&str; 4] = [
    "Stay in well-lit areas",
    "Keep emergency contacts ready",
    "Trust your instincts",
    "Stay aware of surroundings",
];

/// The first `threat_score` entries of the fixed tip list, or the all-clear
/// message for a zero score.
pub fn recommendations(threat_score: u8) -> Vec<String> {
    if threat_score == 0 {
        return vec!["You're in a safe area".to_string()];
    }

    SAFETY_TIPS
        .iter()
        .take(usize::from(threat_score))
        .map(|tip| (*tip).to_string())
        .collect()
}
