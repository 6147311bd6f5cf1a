use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address '{input}': {detail}")]
pub struct AddressError {
    input: String,
    detail: &'static str,
}

impl AddressError {
    fn new(input: &str, detail: &'static str) -> Self {
        Self {
            input: input.to_string(),
            detail,
        }
    }
}

/// A single cell reference in A1 notation. Row and column are 0-based
/// internally; display is 1-based, matching what the office suite expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { col, row }
    }

    /// Parse A1-style notation: a leading alphabetic run (column letters,
    /// case-insensitive) followed by a numeric run (1-based row).
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::new(s, "empty address"));
        }

        let letters_len = trimmed
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        if letters_len == 0 {
            return Err(AddressError::new(s, "missing column letters"));
        }

        let (letters, digits) = trimmed.split_at(letters_len);
        if digits.is_empty() {
            return Err(AddressError::new(s, "missing row number"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::new(s, "row must be a number"));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| AddressError::new(s, "row number out of range"))?;
        if row == 0 {
            return Err(AddressError::new(s, "row numbers start at 1"));
        }

        let col = Self::letters_to_column(letters)
            .ok_or_else(|| AddressError::new(s, "column letters out of range"))?;

        Ok(Self { col, row: row - 1 })
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, ...).
    pub fn letters_to_column(letters: &str) -> Option<u32> {
        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            col = col * 26 + u64::from(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > u64::from(u32::MAX) {
                return None;
            }
        }
        if col == 0 {
            return None;
        }
        Some((col - 1) as u32)
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, ...).
    pub fn column_to_letters(col: u32) -> String {
        let mut letters = String::new();
        let mut n = u64::from(col) + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, ((n % 26) as u8 + b'A') as char);
            n /= 26;
        }
        letters
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A rectangular cell region. `start` is always the top-left corner and `end`
/// the bottom-right; `new` normalizes swapped corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse "A1:B10" notation. Without a separator the input is a single
    /// cell and start == end.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        match s.trim().split_once(':') {
            Some((first, second)) => Ok(Self::new(
                CellAddress::parse(first)?,
                CellAddress::parse(second)?,
            )),
            None => Ok(Self::single(CellAddress::parse(s)?)),
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_addresses() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("B2").unwrap(), CellAddress::new(1, 1));
        assert_eq!(CellAddress::parse("AA1").unwrap(), CellAddress::new(0, 26));
        assert_eq!(CellAddress::parse("C100").unwrap(), CellAddress::new(99, 2));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            CellAddress::parse("aa10").unwrap(),
            CellAddress::parse("AA10").unwrap()
        );
    }

    #[test]
    fn letters_round_trip() {
        for col in [0, 1, 25, 26, 27, 701, 702, 16383] {
            let letters = CellAddress::column_to_letters(col);
            assert_eq!(CellAddress::letters_to_column(&letters), Some(col));
        }
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
    }

    #[test]
    fn parse_rejects_malformed_addresses() {
        for bad in ["", "1A", "A0", "A-1", "A", "12", "A1B", "A 1"] {
            assert!(CellAddress::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn display_round_trip() {
        for text in ["A1", "B2", "AA1", "ZZ99", "XFD1048576"] {
            let addr = CellAddress::parse(text).unwrap();
            assert_eq!(addr.to_string(), text);
        }
    }

    #[test]
    fn range_parse_and_normalize() {
        let range = CellRange::parse("B2:C5").unwrap();
        assert_eq!(range.start, CellAddress::new(1, 1));
        assert_eq!(range.end, CellAddress::new(4, 2));

        // Swapped corners normalize to top-left/bottom-right.
        let swapped = CellRange::parse("C5:B2").unwrap();
        assert_eq!(swapped, range);

        assert_eq!(range.row_count(), 4);
        assert_eq!(range.col_count(), 2);
    }

    #[test]
    fn range_single_cell() {
        let range = CellRange::parse("D4").unwrap();
        assert!(range.is_single());
        assert_eq!(range.start, CellAddress::new(3, 3));
        assert_eq!(range.to_string(), "D4");
    }

    #[test]
    fn range_rejects_malformed_halves() {
        for bad in ["A1:", ":B2", "A1:B", "A1:B2:C3", ":"] {
            assert!(CellRange::parse(bad).is_err(), "accepted {bad:?}");
        }
    }
}
