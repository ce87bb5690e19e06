use std::fmt::Formatter;

/// One-based spreadsheet column (1 = `A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(pub u32);

/// Displays the column letters, as they appear in A1 notation
impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl From<u32> for Column {
    fn from(value: u32) -> Self {
        Column(value)
    }
}

/// Bijective base-26: there is no zero digit, so 26 is `Z` and 27 is `AA`.
/// Zero maps to the empty string.
pub fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

/// Letters for columns `1..=last`, computed once and looked up afterwards.
///
/// Formula generation asks for the same handful of columns thousands of times
/// on large quizzes, so the letters are built up front.
#[derive(Debug, Clone)]
pub struct ColumnLetters {
    letters: Vec<String>,
}

impl ColumnLetters {
    pub fn up_to(last: u32) -> Self {
        Self {
            letters: (1..=last).map(number_to_letters).collect(),
        }
    }

    pub fn get(&self, column: u32) -> &str {
        match column {
            0 => "",
            n => &self.letters[(n - 1) as usize],
        }
    }
}
