/// A decision typed at the comparison prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Prefer the first item shown.
    First,
    /// Prefer the second item shown.
    Second,
    /// Show the live leaderboard without deciding.
    Standings,
    /// Stop early.
    Quit,
}

/// Parse one line of input. Case and surrounding whitespace are ignored.
/// Returns `None` for anything unrecognised so the caller can re-prompt.
pub fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "a" | "left" => Some(Choice::First),
        "2" | "b" | "right" => Some(Choice::Second),
        "s" | "standings" => Some(Choice::Standings),
        "q" | "quit" | "exit" => Some(Choice::Quit),
        _ => None,
    }
}

/// Parse a yes/no answer. Anything but an explicit yes counts as no.
pub fn parse_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Parse item IDs as either a JSON array of strings or plain text (one per line).
/// Blank entries are dropped.
pub fn parse_items_from_str(content: &str) -> Result<Vec<String>, serde_json::Error> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> = serde_json::from_str(trimmed)?;
        Ok(items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    } else {
        Ok(trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}
