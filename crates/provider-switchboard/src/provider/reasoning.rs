//! Reasoning extraction applied on top of any vendor model.

use serde::Serialize;

use super::client::{LanguageModel, ModelRequest};
use super::ProviderKind;

/// Tag wrapping chain-of-thought content in model output.
pub const REASONING_TAG: &str = "think";

/// Generated text split into reasoning and the visible answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningOutput {
    pub reasoning: Option<String>,
    pub text: String,
}

/// Wraps a model so its outputs have `<tag>…</tag>` sections extracted.
#[derive(Debug, Clone)]
pub struct ReasoningModel<M> {
    inner: M,
    tag_name: String,
}

impl<M: LanguageModel> ReasoningModel<M> {
    pub fn new(inner: M, tag_name: impl Into<String>) -> Self {
        Self {
            inner,
            tag_name: tag_name.into(),
        }
    }
}

impl<M: LanguageModel> LanguageModel for ReasoningModel<M> {
    fn provider(&self) -> ProviderKind {
        self.inner.provider()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn request(&self) -> ModelRequest {
        self.inner.request()
    }

    fn postprocess(&self, text: &str) -> ReasoningOutput {
        extract_reasoning(&self.inner.postprocess(text).text, &self.tag_name)
    }

    fn extracts_reasoning(&self) -> bool {
        true
    }
}

/// Move every closed `<tag>…</tag>` section of `text` into `reasoning`.
///
/// Sections are kept verbatim and joined with `\n`. Each section is cut from
/// the text and replaced by `\n` only when text remains on both sides of the
/// cut. An opening tag without a closing tag is left in the text.
pub fn extract_reasoning(text: &str, tag: &str) -> ReasoningOutput {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    // (section start, section end, inner text)
    let mut sections: Vec<(usize, usize, &str)> = Vec::new();
    let mut offset = 0;
    while let Some(found) = text[offset..].find(&open) {
        let start = offset + found;
        let inner_start = start + open.len();
        let Some(len) = text[inner_start..].find(&close) else {
            break;
        };
        let end = inner_start + len + close.len();
        sections.push((start, end, &text[inner_start..inner_start + len]));
        offset = end;
    }

    if sections.is_empty() {
        return ReasoningOutput {
            reasoning: None,
            text: text.to_string(),
        };
    }

    let reasoning = sections
        .iter()
        .map(|(_, _, inner)| *inner)
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    // Cut from the back so earlier offsets stay valid.
    let mut visible = text.to_string();
    for (start, end, _) in sections.iter().rev() {
        let after = visible.split_off(*end);
        visible.truncate(*start);
        if !visible.is_empty() && !after.is_empty() {
            visible.push_str(SEPARATOR);
        }
        visible.push_str(&after);
    }

    ReasoningOutput {
        reasoning: Some(reasoning),
        text: visible,
    }
}

const SEPARATOR: &str = "\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::client::GroqClient;

    #[test]
    fn splits_reasoning_from_answer() {
        let out = extract_reasoning("<think>check units</think>\nThe answer is 4.", "think");
        assert_eq!(out.reasoning.as_deref(), Some("check units"));
        // Leading section: nothing before the cut, so no separator.
        assert_eq!(out.text, "\nThe answer is 4.");
    }

    #[test]
    fn joins_multiple_sections_without_trimming() {
        let out = extract_reasoning("a <think> one </think> b <think>two</think> c", "think");
        assert_eq!(out.reasoning.as_deref(), Some(" one \ntwo"));
        assert_eq!(out.text, "a \n b \n c");
    }

    #[test]
    fn separator_only_between_remaining_text() {
        let out = extract_reasoning("answer<think>why</think>", "think");
        assert_eq!(out.reasoning.as_deref(), Some("why"));
        assert_eq!(out.text, "answer");

        let out = extract_reasoning("<think></think>", "think");
        assert_eq!(out.reasoning.as_deref(), Some(""));
        assert_eq!(out.text, "");
    }

    #[test]
    fn nested_opening_tag_stays_in_section() {
        let out = extract_reasoning("<think>a <think>b</think>c", "think");
        assert_eq!(out.reasoning.as_deref(), Some("a <think>b"));
        assert_eq!(out.text, "c");
    }

    #[test]
    fn leaves_unclosed_tag_in_text() {
        let out = extract_reasoning("<think>never closed", "think");
        assert!(out.reasoning.is_none());
        assert_eq!(out.text, "<think>never closed");
    }

    #[test]
    fn wrapper_delegates_identity() {
        let inner = GroqClient::default().model("moonshotai/kimi-k2-instruct");
        let wrapped = ReasoningModel::new(inner, REASONING_TAG);
        assert_eq!(wrapped.provider(), ProviderKind::Groq);
        assert_eq!(wrapped.model_id(), "moonshotai/kimi-k2-instruct");
        assert!(wrapped.extracts_reasoning());
        let out = wrapped.postprocess("<think>x</think>y");
        assert_eq!(out.reasoning.as_deref(), Some("x"));
        assert_eq!(out.text, "y");
    }
}
