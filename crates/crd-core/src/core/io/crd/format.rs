use super::record::{AtomLine, ExtendedAtomFields, StandardAtomFields};
use std::ops::Range;

/// Largest atom count that still fits the standard layout.
pub const MAX_STANDARD_ATOMS: usize = 99_999;

/// Token that marks an extended-format count line.
pub const EXT_MARKER: &str = "EXT";

/// Column layout of a CRD file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVariant {
    /// `(2I5,1X,A4,1X,A4,3F10.5,1X,A4,1X,A4,F10.5)`
    Standard,
    /// `(2I10,2X,A8,2X,A8,3F20.10,2X,A8,2X,A8,F20.10)`
    Extended,
}

/// Maximum widths of the fields that wrap or get cut on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub serial_digits: usize,
    pub residue_id_digits: usize,
    pub total_residue_digits: usize,
    pub text_chars: usize,
}

/// Byte ranges of the non-coordinate fields of an atom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordColumns {
    pub serial: Range<usize>,
    pub total_residues: Range<usize>,
    pub residue_name: Range<usize>,
    pub name: Range<usize>,
    pub segment_id: Range<usize>,
    pub residue_id: Range<usize>,
    pub temp_factor: Range<usize>,
}

impl FormatVariant {
    /// Selects the layout needed to hold `atom_count` atoms.
    pub fn for_atom_count(atom_count: usize) -> Self {
        if atom_count > MAX_STANDARD_ATOMS {
            FormatVariant::Extended
        } else {
            FormatVariant::Standard
        }
    }

    /// Byte range of an atom line that holds the x, y and z columns.
    pub fn coordinate_columns(self) -> Range<usize> {
        match self {
            FormatVariant::Standard => 20..50,
            FormatVariant::Extended => 45..100,
        }
    }

    pub fn record_columns(self) -> RecordColumns {
        match self {
            FormatVariant::Standard => RecordColumns {
                serial: 0..5,
                total_residues: 5..10,
                residue_name: 11..15,
                name: 16..20,
                segment_id: 51..55,
                residue_id: 56..60,
                temp_factor: 60..70,
            },
            FormatVariant::Extended => RecordColumns {
                serial: 0..10,
                total_residues: 10..20,
                residue_name: 22..30,
                name: 32..40,
                segment_id: 102..110,
                residue_id: 112..120,
                temp_factor: 120..140,
            },
        }
    }

    pub fn limits(self) -> FieldLimits {
        match self {
            FormatVariant::Standard => FieldLimits {
                serial_digits: 5,
                residue_id_digits: 4,
                total_residue_digits: 5,
                text_chars: 4,
            },
            FormatVariant::Extended => FieldLimits {
                serial_digits: 10,
                residue_id_digits: 8,
                total_residue_digits: 10,
                text_chars: 8,
            },
        }
    }

    /// Renders the atom-count line, newline included.
    pub fn render_count(self, atom_count: usize) -> String {
        match self {
            FormatVariant::Standard => format!("{:>5}\n", atom_count),
            FormatVariant::Extended => format!("{:>10}  {}\n", atom_count, EXT_MARKER),
        }
    }

    /// Renders one atom line, newline included, after applying this layout's
    /// truncation rules.
    pub fn render_atom(self, line: &AtomLine) -> String {
        match self {
            FormatVariant::Standard => StandardAtomFields::from_line(line).render(),
            FormatVariant::Extended => ExtendedAtomFields::from_line(line).render(),
        }
    }
}

/// Characters of the extended x field that fall inside the reader's
/// coordinate window (the field spans bytes 40..60, the window starts at 45).
pub const EXTENDED_X_VISIBLE_CHARS: usize = 15;

/// Renders title records: `*`, a separating space when there is text, then the
/// trimmed text.
///
/// Each line of a multi-line title becomes its own record, and remaining
/// control characters are replaced by spaces, so a title can never produce a
/// line the reader would take for data.
pub fn render_title(title: &str) -> String {
    let mut records = String::new();
    for line in title.lines() {
        let text: String = line
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let text = text.trim();
        if text.is_empty() {
            records.push_str("*\n");
        } else {
            records.push_str("* ");
            records.push_str(text);
            records.push('\n');
        }
    }
    if records.is_empty() {
        records.push_str("*\n");
    }
    records
}

/// Whether an extended-layout x value is read back intact.
///
/// Values needing more than [`EXTENDED_X_VISIBLE_CHARS`] characters at ten
/// decimals (x <= -1000 or x >= 10000) lose their leading characters on read.
pub fn extended_x_fits(x: f64) -> bool {
    format!("{:.10}", x).len() <= EXTENDED_X_VISIBLE_CHARS
}

/// Keeps the trailing `digits` characters of the decimal representation of
/// `value`.
///
/// This is a wrap-around, not a clamp: `123456` with 5 digits becomes `23456`.
/// A sign only survives when the whole number already fits.
pub fn wrap_digits(value: i64, digits: usize) -> i64 {
    let repr = value.to_string();
    if repr.len() <= digits {
        return value;
    }
    let modulus = 10u64.pow(digits as u32);
    (value.unsigned_abs() % modulus) as i64
}

/// Keeps at most `max_chars` leading characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_selection_by_atom_count() {
        assert_eq!(FormatVariant::for_atom_count(0), FormatVariant::Standard);
        assert_eq!(FormatVariant::for_atom_count(1), FormatVariant::Standard);
        assert_eq!(
            FormatVariant::for_atom_count(99_999),
            FormatVariant::Standard
        );
        assert_eq!(
            FormatVariant::for_atom_count(100_000),
            FormatVariant::Extended
        );
    }

    #[test]
    fn count_lines_match_fixed_widths() {
        assert_eq!(FormatVariant::Standard.render_count(42), "   42\n");
        assert_eq!(
            FormatVariant::Extended.render_count(100_000),
            "    100000  EXT\n"
        );
    }

    #[test]
    fn title_lines_are_marked_and_trimmed() {
        assert_eq!(render_title("  FRAME 1 FROM x.dcd  "), "* FRAME 1 FROM x.dcd\n");
        assert_eq!(render_title(""), "*\n");
        assert_eq!(render_title("   "), "*\n");
    }

    #[test]
    fn multi_line_titles_become_separate_records() {
        assert_eq!(render_title("line one\nline two"), "* line one\n* line two\n");
        assert_eq!(render_title("a\r\n\nb\n"), "* a\n*\n* b\n");
        assert_eq!(render_title("tab\there\rcr"), "* tab here cr\n");
    }

    #[test]
    fn extended_x_window_limits() {
        assert!(extended_x_fits(-999.5));
        assert!(extended_x_fits(9999.9999999999));
        assert!(!extended_x_fits(-1000.0));
        assert!(!extended_x_fits(10_000.0));
        assert_eq!(
            format!("{:.10}", -999.5).len(),
            EXTENDED_X_VISIBLE_CHARS
        );
    }

    #[test]
    fn wrap_digits_keeps_trailing_digits() {
        assert_eq!(wrap_digits(123_456, 5), 23_456);
        assert_eq!(wrap_digits(99_999, 5), 99_999);
        assert_eq!(wrap_digits(100_000, 5), 0);
        assert_eq!(wrap_digits(12_345, 4), 2_345);
        assert_eq!(wrap_digits(7, 4), 7);
    }

    #[test]
    fn wrap_digits_handles_negative_values_like_a_string_slice() {
        assert_eq!(wrap_digits(-123, 4), -123);
        assert_eq!(wrap_digits(-1234, 4), 1234);
        assert_eq!(wrap_digits(-12_345, 4), 2_345);
    }

    #[test]
    fn truncate_chars_cuts_trailing_characters() {
        assert_eq!(truncate_chars("PROTEINX", 4), "PROT");
        assert_eq!(truncate_chars("PROTEINX", 8), "PROTEINX");
        assert_eq!(truncate_chars("CA", 4), "CA");
        assert_eq!(truncate_chars("", 4), "");
        assert_eq!(truncate_chars("ÅÅÅÅÅ", 4), "ÅÅÅÅ");
    }

    #[test]
    fn coordinate_columns_per_layout() {
        assert_eq!(FormatVariant::Standard.coordinate_columns(), 20..50);
        assert_eq!(FormatVariant::Extended.coordinate_columns(), 45..100);
    }
}
