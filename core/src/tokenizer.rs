use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashSet;

/// Tokens shorter than this (in characters) are never indexed.
pub const MIN_TOKEN_LEN: usize = 2;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","shan't","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Content accepted by [`tokenize`].
///
/// Strings and byte buffers, borrowed or owned, are tokenized; every other
/// value converts to `Unsupported` and produces no tokens at all.
#[derive(Debug, Clone)]
pub enum Input<'a> {
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Unsupported,
}

impl<'a> Input<'a> {
    fn into_text(self) -> Cow<'a, str> {
        match self {
            Input::Text(s) => s,
            Input::Bytes(Cow::Borrowed(b)) => String::from_utf8_lossy(b),
            Input::Bytes(Cow::Owned(b)) => match String::from_utf8(b) {
                Ok(s) => Cow::Owned(s),
                Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
            Input::Unsupported => Cow::Borrowed(""),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self { Input::Text(Cow::Borrowed(s)) }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self { Input::Text(Cow::Borrowed(s)) }
}

impl From<String> for Input<'_> {
    fn from(s: String) -> Self { Input::Text(Cow::Owned(s)) }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self { Input::Bytes(Cow::Borrowed(b)) }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(b: &'a [u8; N]) -> Self { Input::Bytes(Cow::Borrowed(b)) }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(b: &'a Vec<u8>) -> Self { Input::Bytes(Cow::Borrowed(b)) }
}

impl From<Vec<u8>> for Input<'_> {
    fn from(b: Vec<u8>) -> Self { Input::Bytes(Cow::Owned(b)) }
}

macro_rules! unsupported_input {
    ($($t:ty),*) => {
        $(impl From<$t> for Input<'_> {
            fn from(_: $t) -> Self { Input::Unsupported }
        })*
    };
}

unsupported_input!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Split content on runs of whitespace. Empty fields are discarded.
pub fn tokenize<'a>(input: impl Into<Input<'a>>) -> Vec<String> {
    input
        .into()
        .into_text()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Lowercase a token and drop it if it is a stopword or too short to index.
///
/// Punctuation is left untouched, so `"byte?"` normalizes to `"byte?"`.
pub fn normalize(token: &str) -> Option<String> {
    let lowered = token.to_lowercase();
    if is_stopword(&lowered) || lowered.chars().count() < MIN_TOKEN_LEN {
        return None;
    }
    Some(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        assert_eq!(tokenize("I am a block of text"), vec!["I", "am", "a", "block", "of", "text"]);
    }

    #[test]
    fn bytes_match_text() {
        assert_eq!(tokenize(b"fancy a byte?"), tokenize("fancy a byte?"));
    }

    #[test]
    fn non_ascii_lowercase() {
        assert_eq!(normalize("ÉCOLE").as_deref(), Some("école"));
        assert_eq!(normalize("É"), None);
    }
}
