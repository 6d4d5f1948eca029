//! Static fallback content used whenever generation fails.

use cyber_core::model::{KeyConcept, ModuleContent, QuizQuestion};

/// Returns pre-authored content for known topics and a minimal placeholder
/// for everything else. Total: never fails, regardless of input.
#[must_use]
pub fn fallback_content(topic: &str) -> ModuleContent {
    match topic {
        "Phishing Awareness" => phishing_awareness(),
        "Password Security" => password_security(),
        "Ransomware Prevention" => ransomware_prevention(),
        "Data Protection Basics" => data_protection_basics(),
        other => ModuleContent::placeholder(other),
    }
}

fn concept(concept: &str, explanation: &str) -> KeyConcept {
    KeyConcept {
        concept: concept.to_owned(),
        explanation: explanation.to_owned(),
    }
}

fn question(question: &str, options: &[&str], correct: &str) -> QuizQuestion {
    QuizQuestion {
        question: question.to_owned(),
        options: options.iter().map(|&o| o.to_owned()).collect(),
        correct: correct.to_owned(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_owned()).collect()
}

fn phishing_awareness() -> ModuleContent {
    ModuleContent {
        title: "Phishing Awareness".to_owned(),
        introduction: "Phishing attacks are the #1 way hackers target businesses. Learn to spot \
                       suspicious emails and protect your organization."
            .to_owned(),
        key_concepts: vec![
            concept(
                "What is Phishing?",
                "Phishing is when attackers send fake emails pretending to be trusted sources to \
                 steal information.",
            ),
            concept(
                "Recognizing Red Flags",
                "Look for urgent language, requests for passwords, suspicious links, and \
                 mismatched email addresses.",
            ),
            concept(
                "What to Do",
                "Never click links in suspicious emails. Report to IT. Call the company directly \
                 if unsure.",
            ),
        ],
        real_world_examples: strings(&[
            "Email from 'paypa1.com' asking to verify your account",
            "Message from 'CEO' asking for urgent wire transfer",
            "Link to Google login that looks slightly off",
        ]),
        best_practices: strings(&[
            "Hover over links to see actual URL before clicking",
            "Never enter credentials from email links",
            "Report suspicious emails to IT immediately",
            "Verify requests by calling directly",
        ]),
        quiz: vec![
            question(
                "You receive an email from your bank asking to click a link to update payment \
                 info. What should you do?",
                &[
                    "Click the link immediately",
                    "Call your bank directly at their known number",
                    "Forward to colleagues",
                ],
                "Call your bank directly at their known number",
            ),
            question(
                "What's a red flag in a suspicious email?",
                &[
                    "Generic greeting",
                    "Request for sensitive info",
                    "All of the above",
                ],
                "All of the above",
            ),
        ],
    }
}

fn password_security() -> ModuleContent {
    ModuleContent {
        title: "Password Security".to_owned(),
        introduction: "Weak passwords are a major security risk. Learn to create strong passwords \
                       and protect your accounts."
            .to_owned(),
        key_concepts: vec![
            concept(
                "Strong vs Weak Passwords",
                "Strong passwords have 12+ characters, mix upper/lower case, numbers, and symbols.",
            ),
            concept(
                "Password Reuse Risk",
                "Never use the same password across multiple sites. If one site is breached, all \
                 accounts are at risk.",
            ),
        ],
        real_world_examples: strings(&[
            "Weak: 'password123' - Easy to guess",
            "Strong: 'BlueSky$42!Elephant' - Mix of characters",
        ]),
        best_practices: strings(&[
            "Use 12+ character passwords with mixed character types",
            "Never reuse passwords across different sites",
            "Enable Multi-Factor Authentication (MFA) everywhere",
            "Use a password manager to store complex passwords",
        ]),
        quiz: vec![question(
            "Which password is strongest?",
            &["password123", "P@ssw0rd!", "BlueSky$42!Elephant"],
            "BlueSky$42!Elephant",
        )],
    }
}

fn ransomware_prevention() -> ModuleContent {
    ModuleContent {
        title: "Ransomware Prevention".to_owned(),
        introduction: "Ransomware locks your files and demands payment. Learn prevention \
                       strategies to protect your organization."
            .to_owned(),
        key_concepts: vec![
            concept(
                "What is Ransomware?",
                "Malware that encrypts files and demands payment for decryption keys.",
            ),
            concept(
                "How It Spreads",
                "Often through phishing emails, suspicious downloads, or unpatched software.",
            ),
        ],
        real_world_examples: strings(&[
            "Email with infected attachment claiming to be invoice",
            "Fake Windows security warning asking to download",
        ]),
        best_practices: strings(&[
            "Keep all software updated and patched",
            "Don't download files from untrusted sources",
            "Maintain regular encrypted backups",
            "Report unusual activity immediately",
        ]),
        quiz: vec![question(
            "What's the best response if you suspect ransomware?",
            &["Pay the ransom", "Contact IT immediately", "Ignore it"],
            "Contact IT immediately",
        )],
    }
}

fn data_protection_basics() -> ModuleContent {
    ModuleContent {
        title: "Data Protection Basics".to_owned(),
        introduction: "Protecting sensitive data is everyone's responsibility. Learn best \
                       practices for handling business and customer information."
            .to_owned(),
        key_concepts: vec![
            concept(
                "Data Classification",
                "Classify data as public, internal, confidential, or restricted to handle \
                 appropriately.",
            ),
            concept(
                "Access Control",
                "Only authorized personnel should access sensitive data, following 'need to know' \
                 principle.",
            ),
        ],
        real_world_examples: strings(&[
            "Customer credit card data must be encrypted",
            "Employee personal files require access controls",
        ]),
        best_practices: strings(&[
            "Only share data with authorized people",
            "Use secure file sharing (not personal email)",
            "Lock your computer when away",
            "Dispose of sensitive documents securely",
        ]),
        quiz: vec![question(
            "What should you do with sensitive customer data?",
            &[
                "Email it to colleagues",
                "Use secure file sharing",
                "Store on personal cloud",
            ],
            "Use secure file sharing",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyber_core::model::TRAINING_MODULES;

    #[test]
    fn catalog_topics_have_consistent_quizzes() {
        for topic in TRAINING_MODULES {
            let content = fallback_content(topic);
            assert_eq!(content.title, topic);
            assert!(!content.quiz.is_empty(), "{topic} should ship a quiz");
            assert!(
                content.quiz_is_consistent(),
                "{topic} has a correct answer outside its options"
            );
            assert!(!content.key_concepts.is_empty());
            assert!(!content.best_practices.is_empty());
        }
    }

    #[test]
    fn unknown_topic_gets_placeholder() {
        let content = fallback_content("Quantum Key Distribution");
        assert_eq!(content.title, "Quantum Key Distribution");
        assert!(content.key_concepts.is_empty());
        assert!(content.real_world_examples.is_empty());
        assert!(content.best_practices.is_empty());
        assert!(content.quiz.is_empty());
    }

    #[test]
    fn empty_topic_still_returns_content() {
        let content = fallback_content("");
        assert_eq!(content.title, "");
        assert!(content.quiz.is_empty());
    }
}
