use crate::error::RelayError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INLINE_CODE: Regex = Regex::new(r"`(.*?)`").unwrap();
}

/// What the chat handler sends back for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerView {
    Content(String),
    TooLong,
    Notice(String),
}

/// Rewrites every `` `span` `` into a triple-backtick span.
pub fn format_code_blocks(text: &str) -> String {
    INLINE_CODE.replace_all(text, "```${1}```").into_owned()
}

/// Formats `answer` and applies the display limits. Lengths are counted in
/// characters.
pub fn render_answer(answer: &str, long_response_limit: usize, max_message_length: usize) -> AnswerView {
    let formatted = format_code_blocks(answer);
    if formatted.chars().count() > long_response_limit {
        return AnswerView::TooLong;
    }
    AnswerView::Content(formatted.chars().take(max_message_length).collect())
}

/// The rendered answer, or the error notice when completing or delivering
/// the answer failed.
pub fn chat_reply(
    outcome: &Result<String, RelayError>,
    long_response_limit: usize,
    max_message_length: usize
) -> AnswerView {
    match outcome {
        Ok(answer) => render_answer(answer, long_response_limit, max_message_length),
        Err(e) => AnswerView::Notice(e.user_notice()),
    }
}
