//! Chord catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::note::{Letter, Note};

/// A named chord with its role-tagged voicings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chord {
    /// Chord name used by the progression (e.g. `"Am"`).
    pub name: String,
    /// Four-note pad voicing.
    pub pad: [Note; 4],
    /// Bass note.
    pub bass: Note,
    /// Four-note arpeggio pattern, indexed cyclically.
    pub arp: [Note; 4],
}

impl Chord {
    /// Arpeggio note for step `i`, wrapping around the pattern.
    pub fn arp_note(&self, i: usize) -> Note {
        self.arp[i % self.arp.len()]
    }

    /// Top note of the arpeggio pattern.
    pub fn top_arp_note(&self) -> &Note {
        &self.arp[self.arp.len() - 1]
    }

    /// Every note this chord can sound.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.pad
            .iter()
            .chain(std::iter::once(&self.bass))
            .chain(self.arp.iter())
    }
}

const fn n(letter: Letter, octave: i32) -> Note {
    Note::natural(letter, octave)
}

/// The four triads of the default catalog: C, Am, F and G.
pub fn default_catalog() -> Vec<Chord> {
    use Letter::*;

    vec![
        Chord {
            name: "C".to_string(),
            pad: [n(C, 3), n(G, 3), n(E, 4), n(G, 4)],
            bass: n(C, 2),
            arp: [n(C, 4), n(E, 4), n(G, 4), n(C, 5)],
        },
        Chord {
            name: "Am".to_string(),
            pad: [n(A, 2), n(E, 3), n(C, 4), n(E, 4)],
            bass: n(A, 2),
            arp: [n(A, 3), n(C, 4), n(E, 4), n(A, 4)],
        },
        Chord {
            name: "F".to_string(),
            pad: [n(F, 2), n(C, 3), n(A, 3), n(C, 4)],
            bass: n(F, 2),
            arp: [n(F, 3), n(A, 3), n(C, 4), n(F, 4)],
        },
        Chord {
            name: "G".to_string(),
            pad: [n(G, 2), n(D, 3), n(B, 3), n(D, 4)],
            bass: n(G, 2),
            arp: [n(G, 3), n(B, 3), n(D, 4), n(G, 4)],
        },
    ]
}

/// Default progression order.
pub fn default_progression() -> Vec<String> {
    ["C", "Am", "F", "G"].iter().map(|s| s.to_string()).collect()
}

/// High melody pair per chord: root and fifth, an octave or more above the arpeggio.
pub fn default_melody() -> BTreeMap<String, [Note; 2]> {
    use Letter::*;

    BTreeMap::from([
        ("C".to_string(), [n(C, 5), n(G, 5)]),
        ("Am".to_string(), [n(A, 5), n(E, 5)]),
        ("F".to_string(), [n(F, 5), n(C, 6)]),
        ("G".to_string(), [n(G, 5), n(D, 6)]),
    ])
}
