//! Property-based tests for line reading and tokenizing.

use noosh::reader::{LINE_BUFSIZE, LineReader};
use noosh::tokenizer::{DELIMITERS, is_delimiter, split_line};
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #[test]
    fn read_line_reproduces_input(line in "[^\n]{0,4000}") {
        let mut input = line.clone().into_bytes();
        input.push(b'\n');

        let mut reader = LineReader::new(Cursor::new(input), Vec::<u8>::new());
        let outcome = reader.read_raw().unwrap();

        prop_assert_eq!(outcome.line.as_bytes(), line.as_bytes());
        prop_assert!(!outcome.at_eof);
    }

    #[test]
    fn read_line_around_growth_boundaries(extra in 0usize..3, offset in 0usize..3) {
        let len = LINE_BUFSIZE * (extra + 1) + offset - 1;
        let line = "q".repeat(len);

        let input = Cursor::new(line.clone().into_bytes());
        let mut reader = LineReader::new(input, Vec::<u8>::new());
        let outcome = reader.read_raw().unwrap();

        prop_assert_eq!(outcome.line.len(), len);
        prop_assert_eq!(outcome.line.as_bytes(), line.as_bytes());
        prop_assert!(outcome.at_eof);
    }

    #[cfg(unix)]
    #[test]
    fn read_line_keeps_arbitrary_bytes(mut bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        bytes.retain(|&b| b != b'\n');
        let mut input = bytes.clone();
        input.push(b'\n');

        let mut reader = LineReader::new(Cursor::new(input), Vec::<u8>::new());
        let outcome = reader.read_raw().unwrap();

        prop_assert_eq!(outcome.line.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn tokens_match_a_naive_split(line in "[a-z \\t\\r\\n\\x07-]{0,300}") {
        let tokens = split_line(&line).unwrap();
        let expected: Vec<&str> = line
            .split(|c: char| c.is_ascii() && DELIMITERS.contains(&(c as u8)))
            .filter(|t| !t.is_empty())
            .collect();

        prop_assert_eq!(tokens.as_slice(), expected.as_slice());
    }

    #[test]
    fn tokens_are_never_empty_or_delimited(line in "\\PC{0,200}") {
        let tokens = split_line(&line).unwrap();
        for token in tokens.iter() {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.as_encoded_bytes().iter().any(|&b| is_delimiter(b)));
        }
    }

    #[test]
    fn joined_words_split_back(words in prop::collection::vec("[a-zA-Z0-9./_-]{1,12}", 0..200)) {
        let line = words.join(" \t ");
        let tokens = split_line(&line).unwrap();
        prop_assert!(tokens.iter().eq(words.iter().map(String::as_str)));
    }
}
