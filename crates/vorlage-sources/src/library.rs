//! Seed verse data and per-tradition lookup.
//!
//! The library answers every request: a verse outside the seed set (or a
//! failed remote fetch) degrades to a bracketed placeholder [`Passage`]
//! with the reason in `notes`, so the caller always has all four columns
//! to render.

use std::collections::HashMap;

use tracing::warn;
use vorlage_types::{Passage, Tradition, VerseRef};

use crate::lxx_remote::RemoteLxx;

struct SeedVerse {
    reference: &'static str,
    original: &'static str,
    english: &'static str,
    notes: &'static str,
}

const MASORETIC: &[SeedVerse] = &[
    SeedVerse {
        reference: "Genesis 1:1",
        original: "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ׃",
        english: "In the beginning God created the heaven and the earth.",
        notes: "Source: Sefaria seed snapshot (JPS 1917 translation)",
    },
    SeedVerse {
        reference: "Isaiah 7:14",
        original: "הִנֵּה הָעַלְמָה הָרָה וְיֹלֶדֶת בֵּן",
        english: "Behold, the young woman shall conceive, and bear a son.",
        notes: "Source: Sefaria seed snapshot (JPS 1917 translation)",
    },
    SeedVerse {
        reference: "Psalm 22:16",
        original: "כָּאֲרִי יָדַי וְרַגְלָי",
        english: "Like a lion, they are at my hands and my feet.",
        notes: "Source: Sefaria seed snapshot (JPS 1917 translation)",
    },
];

const DSS: &[SeedVerse] = &[
    SeedVerse {
        reference: "Isaiah 7:14",
        original: "העלמה הרה וילדת בן",
        english: "The young woman is with child and bears a son.",
        notes: "1QIsa-a, fragmentary; nearly identical to the Masoretic reading",
    },
    SeedVerse {
        reference: "Psalm 22:16",
        original: "כארו ידי ורגלי",
        english: "They have pierced my hands and my feet.",
        notes: "5/6HevPs reading; some manuscripts differ from the Masoretic",
    },
];

const SEPTUAGINT: &[SeedVerse] = &[
    SeedVerse {
        reference: "Genesis 1:1",
        original: "Ἐν ἀρχῇ ἐποίησεν ὁ θεὸς τὸν οὐρανὸν καὶ τὴν γῆν.",
        english: "In the beginning God made the heaven and the earth.",
        notes: "Source: Brenton translation (public domain)",
    },
    SeedVerse {
        reference: "Isaiah 7:14",
        original: "ἰδοὺ ἡ παρθένος ἐν γαστρὶ ἕξει καὶ τέξεται υἱόν",
        english: "Behold, a virgin shall conceive in the womb, and shall bring forth a son.",
        notes: "Source: Brenton translation (public domain)",
    },
    SeedVerse {
        reference: "Psalm 22:16",
        original: "ὤρυξαν χεῖράς μου καὶ πόδας μου",
        english: "They pierced my hands and my feet.",
        notes: "LXX Psalm 21:17; Brenton translation (public domain)",
    },
];

const VULGATE: &[SeedVerse] = &[
    SeedVerse {
        reference: "Genesis 1:1",
        original: "In principio creavit Deus caelum et terram.",
        english: "In the beginning God created heaven, and earth.",
        notes: "Source: Challoner revision (public domain)",
    },
    SeedVerse {
        reference: "Isaiah 7:14",
        original: "Ecce virgo concipiet, et pariet filium",
        english: "Behold a virgin shall conceive, and bear a son.",
        notes: "Source: Challoner revision (public domain); 'virgo' where the Masoretic has עלמה",
    },
    SeedVerse {
        reference: "Psalm 22:16",
        original: "foderunt manus meas et pedes meos",
        english: "They have dug my hands and feet.",
        notes: "Vulgate Psalm 21:17; Challoner revision (public domain); 'foderunt' = 'they have dug'",
    },
];

fn seed_for(tradition: Tradition) -> &'static [SeedVerse] {
    match tradition {
        Tradition::Masoretic => MASORETIC,
        Tradition::DeadSeaScrolls => DSS,
        Tradition::Septuagint => SEPTUAGINT,
        Tradition::Vulgate => VULGATE,
    }
}

/// All verse data the service can serve: the static seed set, plus an
/// optional remote Septuagint loader consulted before the LXX seed.
pub struct Library {
    seed: HashMap<(Tradition, &'static str), &'static SeedVerse>,
    lxx_remote: Option<RemoteLxx>,
}

impl Library {
    /// Library over the static seed verses only.
    pub fn seeded() -> Self {
        let mut seed = HashMap::new();
        for tradition in Tradition::ALL {
            for verse in seed_for(tradition) {
                seed.insert((tradition, verse.reference), verse);
            }
        }
        Library {
            seed,
            lxx_remote: None,
        }
    }

    /// Consult a remote Septuagint source before the LXX seed data.
    pub fn with_remote_lxx(mut self, remote: RemoteLxx) -> Self {
        self.lxx_remote = Some(remote);
        self
    }

    /// Look up one tradition's text for a verse. Never fails: misses and
    /// fetch errors come back as placeholder passages.
    pub async fn passage(&self, tradition: Tradition, verse: &VerseRef) -> Passage {
        let reference = verse.to_string();

        if tradition == Tradition::Septuagint
            && let Some(remote) = &self.lxx_remote
        {
            match remote.passage(&reference).await {
                Ok(Some(passage)) => return passage,
                Ok(None) => {}
                Err(err) => {
                    warn!("remote LXX lookup for {reference} failed: {err:#}");
                }
            }
        }

        match self.seed.get(&(tradition, reference.as_str())) {
            Some(seeded) => Passage {
                original: seeded.original.to_string(),
                english: seeded.english.to_string(),
                notes: seeded.notes.to_string(),
            },
            None => Passage::unavailable(format!(
                "{reference} is not in the {tradition} seed set"
            )),
        }
    }
}
