//! Canned reply selection
//!
//! Simulates a teacher on the other side of a thread. Rules are scanned in
//! declaration order and the first rule with a keyword contained in the
//! lower-cased message wins, so greetings shadow topic rules, which shadow
//! gratitude.

/// Reply used when no rule matches
pub const DEFAULT_REPLY: &str = "Thank you for your message. I'll get back to you soon with more information about your child's progress.";

/// One keyword set and the response it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRule {
    pub keywords: Vec<String>,
    pub response: String,
}

impl ReplyRule {
    /// Keywords are stored lower-cased so matching stays case-insensitive.
    pub fn new<I, S>(keywords: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Pure mapping from an outgoing message to a reply string
#[derive(Debug, Clone)]
pub struct ReplyEngine {
    rules: Vec<ReplyRule>,
    default_reply: String,
}

impl Default for ReplyEngine {
    fn default() -> Self {
        Self::with_rules(default_rules(), DEFAULT_REPLY)
    }
}

impl ReplyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from custom rules; order is significant.
    pub fn with_rules(rules: Vec<ReplyRule>, default_reply: impl Into<String>) -> Self {
        Self {
            rules,
            default_reply: default_reply.into(),
        }
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Select the reply for `body`
    ///
    /// ```
    /// use libportal::ReplyEngine;
    ///
    /// let engine = ReplyEngine::new();
    /// assert!(engine.generate_reply("Hello there!").starts_with("Hello!"));
    /// ```
    pub fn generate_reply(&self, body: &str) -> &str {
        let lowered = body.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.response.as_str())
            .unwrap_or(self.default_reply.as_str())
    }
}

fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule::new(
            ["hello", "hi", "hey", "greetings"],
            "Hello! How can I help you today regarding your child's education?",
        ),
        ReplyRule::new(
            ["project", "assignment", "homework"],
            "I'm glad you're asking about that. The project is coming along well. Your child has been very engaged in class.",
        ),
        ReplyRule::new(
            ["grade", "score", "marks", "performance"],
            "Your child has been performing well in recent assessments. They scored above class average in the last test.",
        ),
        ReplyRule::new(
            ["meeting", "conference", "appointment", "schedule"],
            "I'm available for a parent-teacher meeting next week. Would Tuesday or Thursday afternoon work for you?",
        ),
        ReplyRule::new(
            ["thank", "thanks"],
            "You're welcome! Please let me know if you have any other questions.",
        ),
    ]
}
