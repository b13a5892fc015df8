//! Chunk file name decoding.
//!
//! Names look like `05lege123_chunk1.txt`: two year digits, a four-character
//! title, the document code, then `_chunk<N>` and an extension. Anything that
//! does not fit decodes to `None`; callers skip such files.

use super::FileMeta;

/// Decode a chunk file name. Returns `None` for any malformed name.
pub fn decode_filename(name: &str) -> Option<FileMeta> {
    let (main, chunk_part) = name.split_once('_')?;

    let chars: Vec<char> = main.chars().collect();
    if chars.len() < 6 {
        return None;
    }

    let year = expand_year(&chars[..2])?;
    let title: String = chars[2..6].iter().collect();
    let law = format!("{}/{year}", title_case(&title));
    let code: String = chars[6..].iter().collect();

    let chunk_str = chunk_part.replace("chunk", "");
    let chunk = strip_extension(&chunk_str).parse::<i64>().ok()?;

    Some(FileMeta {
        year,
        law,
        code,
        main_id: main.to_string(),
        chunk,
    })
}

/// `9x` is 19xx, anything else 20xx. `89` therefore maps to 2089.
fn expand_year(prefix: &[char]) -> Option<i32> {
    if !prefix.iter().all(char::is_ascii_digit) {
        return None;
    }
    let century = if prefix[0] == '9' { "19" } else { "20" };
    let digits: String = prefix.iter().collect();
    format!("{century}{digits}").parse().ok()
}

/// Uppercase letters that start a run of letters, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Drop the last `.ext`, leaving leading dots (hidden-file style) alone.
fn strip_extension(s: &str) -> &str {
    match s.rfind('.') {
        Some(idx) if s[..idx].chars().any(|c| c != '.') => &s[..idx],
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_name() {
        let meta = decode_filename("05lege123_chunk1.txt").unwrap();
        assert_eq!(meta.year, 2005);
        assert_eq!(meta.law, "Lege/2005");
        assert_eq!(meta.code, "123");
        assert_eq!(meta.main_id, "05lege123");
        assert_eq!(meta.chunk, 1);
    }

    #[test]
    fn title_is_exactly_four_characters() {
        // "civ" is three characters, so the fourth comes from the code
        let meta = decode_filename("05civ123_chunk1.txt").unwrap();
        assert_eq!(meta.law, "Civ1/2005");
        assert_eq!(meta.code, "23");
    }

    #[test]
    fn year_century_boundary() {
        let year = |name: &str| decode_filename(name).unwrap().year;
        assert_eq!(year("05lege1_chunk1.txt"), 2005);
        assert_eq!(year("95lege1_chunk1.txt"), 1995);
        assert_eq!(year("90lege1_chunk1.txt"), 1990);
        assert_eq!(year("89lege1_chunk1.txt"), 2089);
        assert_eq!(year("00lege1_chunk1.txt"), 2000);
        assert_eq!(year("99lege1_chunk1.txt"), 1999);
    }

    #[test]
    fn title_case_follows_letter_runs() {
        assert_eq!(title_case("LEGE"), "Lege");
        assert_eq!(title_case("oug1"), "Oug1");
        assert_eq!(title_case("a1b2"), "A1B2");
        assert_eq!(title_case("hg-x"), "Hg-X");
        assert_eq!(title_case("ȘTIR"), "Știr");
    }

    #[test]
    fn empty_code_is_allowed() {
        let meta = decode_filename("12hotx_chunk7.txt").unwrap();
        assert_eq!(meta.law, "Hotx/2012");
        assert_eq!(meta.code, "");
        assert_eq!(meta.chunk, 7);
    }

    #[test]
    fn chunk_without_extension() {
        assert_eq!(decode_filename("12lege9_chunk42").unwrap().chunk, 42);
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(decode_filename("05lege123chunk1.txt").is_none(), "no underscore");
        assert!(decode_filename("x5lege123_chunk1.txt").is_none(), "non-numeric year");
        assert!(decode_filename("05leg_chunk1.txt").is_none(), "main too short");
        assert!(decode_filename("05lege123_chunkA.txt").is_none(), "non-numeric chunk");
        assert!(decode_filename("05lege123_chunk1_b.txt").is_none(), "second underscore");
        assert!(decode_filename("05lege123_chunk.txt").is_none(), "empty chunk");
        assert!(decode_filename("05lege123_chunk1.tar.gz").is_none(), "double extension");
    }

    #[test]
    fn strip_extension_keeps_leading_dots() {
        assert_eq!(strip_extension("1.txt"), "1");
        assert_eq!(strip_extension(".txt"), ".txt");
        assert_eq!(strip_extension("12"), "12");
    }
}
