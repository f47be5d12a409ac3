//! Model-free stand-in for the summarization model: keeps the leading
//! sentences of the input up to a word budget.

use shared::error::SummarizeRejection;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '\u{0964}', '\u{0965}'];

#[derive(Debug, Clone)]
pub struct LeadSummarizer {
    max_summary_words: usize,
    max_input_chars: usize,
}

impl LeadSummarizer {
    pub fn new(max_summary_words: usize, max_input_chars: usize) -> Self {
        Self {
            max_summary_words: max_summary_words.max(1),
            max_input_chars: max_input_chars.max(1),
        }
    }

    pub fn summarize(&self, text: &str) -> Result<String, SummarizeRejection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizeRejection::EmptyText);
        }

        let input: String = text.chars().take(self.max_input_chars).collect();
        if !input.chars().any(char::is_alphanumeric) {
            return Err(SummarizeRejection::NoWords);
        }
        let mut summary: Vec<&str> = Vec::new();
        let mut words = 0;
        for sentence in sentences(&input) {
            let sentence_words = sentence.split_whitespace().count();
            if summary.is_empty() && sentence_words > self.max_summary_words {
                return Ok(truncate_words(sentence, self.max_summary_words));
            }
            if words + sentence_words > self.max_summary_words {
                break;
            }
            words += sentence_words;
            summary.push(sentence);
        }

        Ok(summary.join(" "))
    }
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }
        let at_boundary = match chars.peek() {
            Some((_, next)) => next.is_whitespace(),
            None => true,
        };
        if at_boundary {
            let end = index + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

fn truncate_words(sentence: &str, max_words: usize) -> String {
    let mut truncated = sentence
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    truncated.push('…');
    truncated
}
