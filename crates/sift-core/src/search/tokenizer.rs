/// Scanner state.
///
/// | state   | on `"`                                        | at end of input           |
/// |---------|-----------------------------------------------|---------------------------|
/// | Outside | flush words before the quote, enter Inside    | flush words from `cut`    |
/// | Inside  | emit the quoted span, back to Outside         | flush words from `start`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    /// Byte offset of the first character not yet emitted.
    Outside { cut: usize },
    /// Byte offset where the open span (quote or `-"`) begins.
    Inside { start: usize },
}

pub fn split_words(input: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut state = QuoteState::Outside { cut: 0 };
    let mut prev = None;

    for (pos, ch) in input.char_indices() {
        if ch == '"' {
            state = match state {
                QuoteState::Outside { cut } => {
                    let boundary = match prev {
                        Some('-') => (pos - 1).max(cut),
                        _ => pos,
                    };
                    words.extend(input[cut..boundary].split_whitespace());
                    QuoteState::Inside { start: boundary }
                }
                QuoteState::Inside { start } => {
                    words.push(&input[start..=pos]);
                    QuoteState::Outside { cut: pos + 1 }
                }
            };
        }
        prev = Some(ch);
    }

    // An unterminated quote is not special: whatever follows it splits like plain text.
    let rest = match state {
        QuoteState::Outside { cut } => cut,
        QuoteState::Inside { start } => start,
    };
    words.extend(input[rest..].split_whitespace());
    words
}
