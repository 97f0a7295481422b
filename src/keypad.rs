/// Digit used for the space between words.
pub const SEPARATOR: char = '0';

/// Number of letter keys ('2' to '9') on the keypad.
pub const KEYS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("'{0}' can't be typed on the keypad")]
    NotAlphabetic(char),
}

/// Map a single character to its keypad digit (case-insensitive).
pub fn char_to_digit(c: char) -> Result<char, Error> {
    let digit = match c.to_ascii_lowercase() {
        'a'..='c' => '2',
        'd'..='f' => '3',
        'g'..='i' => '4',
        'j'..='l' => '5',
        'm'..='o' => '6',
        'p'..='s' => '7',
        't'..='v' => '8',
        'w'..='z' => '9',
        ' ' => SEPARATOR,
        _ => return Err(Error::NotAlphabetic(c)),
    };

    Ok(digit)
}

/// Encode a whole string. Fails on the first character that has no key.
pub fn encode(text: &str) -> Result<String, Error> {
    text.chars().map(char_to_digit).collect()
}

/// A query may only contain the letter keys '2' to '9'.
pub fn is_valid_digit_query(s: &str) -> bool {
    s.chars().all(|c| ('2'..='9').contains(&c))
}

/// Child slot for a letter key ('2' -> 0 ... '9' -> 7).
pub fn digit_index(d: char) -> Option<usize> {
    match d {
        '2'..='9' => Some(d as usize - '2' as usize),
        _ => None,
    }
}

/// Letters printed on a key.
pub fn letters(d: char) -> &'static str {
    match d {
        '2' => "abc",
        '3' => "def",
        '4' => "ghi",
        '5' => "jkl",
        '6' => "mno",
        '7' => "pqrs",
        '8' => "tuv",
        '9' => "wxyz",
        SEPARATOR => " ",
        _ => "",
    }
}
