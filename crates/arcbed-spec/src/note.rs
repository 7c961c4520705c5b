//! Note names and pitch resolution.
//!
//! A [`Note`] is a pitch letter, an optional accidental and an octave. Notes
//! serialize as their name (`"C#4"`, `"Bb2"`), so config files stay readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Lowest octave accepted by the parser (MIDI note 0 is C-1).
pub const MIN_OCTAVE: i32 = -1;
/// Highest octave accepted by the parser.
pub const MAX_OCTAVE: i32 = 9;

/// Pitch letter of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitone offset above C.
    pub const fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Accidental applied to a pitch letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Semitone adjustment.
    pub const fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// An immutable note value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    letter: Letter,
    accidental: Accidental,
    octave: i32,
}

impl Note {
    /// Creates a note from its parts.
    pub const fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Creates a natural note.
    pub const fn natural(letter: Letter, octave: i32) -> Self {
        Self::new(letter, Accidental::Natural, octave)
    }

    /// Parses a note name such as `"C4"`, `"F#3"`, `"Bb2"` or `"A-1"`.
    pub fn parse(name: &str) -> SpecResult<Self> {
        let invalid = || SpecError::invalid_note(name);

        let mut chars = name.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (accidental, octave_str) = if let Some(stripped) = rest.strip_prefix('#') {
            (Accidental::Sharp, stripped)
        } else if let Some(stripped) = rest.strip_prefix('b') {
            (Accidental::Flat, stripped)
        } else {
            (Accidental::Natural, rest)
        };

        // Reject "+4" and similar forms that i32::from_str would accept.
        if octave_str.starts_with('+') {
            return Err(invalid());
        }
        let octave: i32 = octave_str.parse().map_err(|_| invalid())?;
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(invalid());
        }

        Ok(Self::new(letter, accidental, octave))
    }

    /// Pitch letter.
    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Accidental.
    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Octave number (C4 is middle C).
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Returns the same pitch class in another octave.
    pub fn with_octave(&self, octave: i32) -> Self {
        Self {
            octave,
            ..*self
        }
    }

    /// MIDI note number: `12 * (octave + 1) + semitone`.
    ///
    /// Not clamped to 0..=127; `Cb-1` yields -1.
    pub fn midi(&self) -> i32 {
        12 * (self.octave + 1) + self.letter.semitone() + self.accidental.offset()
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(&self) -> f64 {
        midi_to_frequency(self.midi())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.letter.as_char(), accidental, self.octave)
    }
}

impl FromStr for Note {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s)
    }
}

impl TryFrom<String> for Note {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Note::parse(&value)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

/// Converts a MIDI note number to frequency in Hz.
///
/// Computes `440 * 2^((midi - 69) / 12)`, split into whole octaves and a
/// semitone remainder so that A4 is exactly 440 Hz and moving up an octave
/// exactly doubles the result.
pub fn midi_to_frequency(midi: i32) -> f64 {
    let offset = midi - 69;
    let octaves = offset.div_euclid(12);
    let semitones = offset.rem_euclid(12);
    440.0 * 2.0_f64.powi(octaves) * 2.0_f64.powf(semitones as f64 / 12.0)
}

/// Resolves a note name directly to its frequency in Hz.
pub fn resolve_frequency(name: &str) -> SpecResult<f64> {
    Note::parse(name).map(|note| note.frequency())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_is_exactly_440() {
        assert_eq!(resolve_frequency("A4").unwrap(), 440.0);
    }

    #[test]
    fn test_c4_frequency() {
        let c4 = resolve_frequency("C4").unwrap();
        assert!((c4 - 261.63).abs() < 0.01, "got {}", c4);
    }

    #[test]
    fn test_octave_doubling_is_exact() {
        for name in ["C", "C#", "Db", "E", "F#", "G", "Ab", "A", "Bb", "B"] {
            for octave in 0..8 {
                let low = Note::parse(&format!("{}{}", name, octave)).unwrap();
                let high = low.with_octave(octave + 1);
                assert_eq!(high.frequency(), 2.0 * low.frequency(), "{}", low);
            }
        }
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(Note::parse("C4").unwrap().midi(), 60);
        assert_eq!(Note::parse("A4").unwrap().midi(), 69);
        assert_eq!(Note::parse("C-1").unwrap().midi(), 0);
        assert_eq!(Note::parse("C#4").unwrap().midi(), 61);
        assert_eq!(Note::parse("Db4").unwrap().midi(), 61);
        assert_eq!(Note::parse("A2").unwrap().midi(), 45);
    }

    #[test]
    fn test_enharmonic_equivalents_match() {
        let pairs = [("C#3", "Db3"), ("F#2", "Gb2"), ("A#5", "Bb5"), ("G#4", "Ab4")];
        for (sharp, flat) in pairs {
            assert_eq!(
                resolve_frequency(sharp).unwrap(),
                resolve_frequency(flat).unwrap()
            );
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "H4", "c4", "C", "C#", "Cx4", "C+4", "C44", "C10", "4C"] {
            let err = Note::parse(name).unwrap_err();
            assert!(
                matches!(err, SpecError::InvalidNote { .. }),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_display_roundtrips_name() {
        for name in ["C3", "F#2", "Bb5", "A-1", "G9"] {
            assert_eq!(Note::parse(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_serde_uses_note_name() {
        let note = Note::new(Letter::E, Accidental::Flat, 3);
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, "\"Eb3\"");
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
        assert!(serde_json::from_str::<Note>("\"Q3\"").is_err());
    }
}
