use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of juz the Quran is divided into
pub const JUZ_COUNT: u8 = 30;

/// Transliterated name of each juz, indexed by `juz - 1`
const JUZ_NAMES: [&str; 30] = [
    "Alif Lam Mim",
    "Sayaqool",
    "Tilkal Rusul",
    "Lan Tanaloo",
    "Wal Muhsanat",
    "La Yuhibbullah",
    "Wa Iza Sami'oo",
    "Wa Lau Annana",
    "Qalal Mala'u",
    "Wa A'lamu",
    "Ya'tazeroon",
    "Wa Ma Min Dabbah",
    "Wa Ma Ubarri'u",
    "Rubama",
    "Subhanallazi",
    "Qal Alam",
    "Iqtaraba",
    "Qad Aflaha",
    "Wa Qalallazina",
    "A'man Khalaq",
    "Utlu Ma Oohiya",
    "Wa Man Yaqnut",
    "Wa Mali",
    "Faman Azlamu",
    "Ilayhi Yuraddu",
    "Ha Mim",
    "Qala Fama Khatbukum",
    "Qad Sami Allahu",
    "Tabarakallazi",
    "Amma Yatasa'aloon",
];

/// Arabic name of each juz, indexed by `juz - 1`
const JUZ_NAMES_AR: [&str; 30] = [
    "الٓمٓ",
    "سَيَقُولُ",
    "تِلْكَ ٱلرُّسُلُ",
    "لَن تَنَالُوا۟",
    "وَٱلْمُحْصَنَـٰتُ",
    "لَا يُحِبُّ ٱللَّهُ",
    "وَإِذَا سَمِعُوا۟",
    "وَلَوْ أَنَّنَا",
    "قَالَ ٱلْمَلَأُ",
    "وَٱعْلَمُوٓا۟",
    "يَعْتَذِرُونَ",
    "وَمَا مِن دَآبَّةٍ",
    "وَمَآ أُبَرِّئُ",
    "رُبَمَا",
    "سُبْحَـٰنَ ٱلَّذِىٓ",
    "قَالَ أَلَمْ",
    "ٱقْتَرَبَ",
    "قَدْ أَفْلَحَ",
    "وَقَالَ ٱلَّذِينَ",
    "أَمَّنْ خَلَقَ",
    "ٱتْلُ مَآ أُوحِىَ",
    "وَمَن يَقْنُتْ",
    "وَمَآ لِىَ",
    "فَمَنْ أَظْلَمُ",
    "إِلَيْهِ يُرَدُّ",
    "حمٓ",
    "قَالَ فَمَا خَطْبُكُمْ",
    "قَدْ سَمِعَ ٱللَّهُ",
    "تَبَـٰرَكَ ٱلَّذِى",
    "عَمَّ يَتَسَآءَلُونَ",
];

/// First verse key of each juz, indexed by `juz - 1`
const JUZ_FIRST_VERSE: [&str; 30] = [
    "1:1", "2:142", "2:253", "3:93", "4:24", "4:148", "5:82", "6:111", "7:88", "8:41", "9:93",
    "11:6", "12:53", "15:1", "17:1", "18:75", "21:1", "23:1", "25:21", "27:56", "29:46", "33:31",
    "36:28", "39:32", "41:47", "46:1", "51:31", "58:1", "67:1", "78:1",
];

/// A juz number, guaranteed to lie in `1..=30`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct JuzNumber(pub(crate) u8);

impl JuzNumber {
    pub fn new(n: u8) -> Result<Self> {
        if (1..=JUZ_COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(Error::InvalidJuz(n.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All 30 juz in order
    pub fn all() -> impl Iterator<Item = JuzNumber> {
        (1..=JUZ_COUNT).map(JuzNumber)
    }

    pub fn name(self) -> &'static str {
        JUZ_NAMES[self.index()]
    }

    pub fn name_ar(self) -> &'static str {
        JUZ_NAMES_AR[self.index()]
    }

    pub fn first_verse(self) -> &'static str {
        JUZ_FIRST_VERSE[self.index()]
    }

    /// Filename of the archival page for this juz
    pub fn page_file_name(self) -> String {
        format!("juz-{}.html", self.0)
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for JuzNumber {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self> {
        JuzNumber::new(n)
    }
}

impl From<JuzNumber> for u8 {
    fn from(juz: JuzNumber) -> u8 {
        juz.0
    }
}

impl fmt::Display for JuzNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Tafsir commentary for a single verse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TafsirEntry {
    /// Verse key in `surah:verse` form
    pub verse_key: String,
    /// Commentary as HTML, as served by the tafsir API
    pub text: String,
    /// Uthmani script of the verse (may be empty)
    #[serde(default)]
    pub uthmani: String,
}

impl TafsirEntry {
    /// Anchor id used for the verse card, e.g. `v-4-148`
    pub fn anchor_id(&self) -> String {
        verse_anchor_id(&self.verse_key)
    }
}

pub fn verse_anchor_id(verse_key: &str) -> String {
    format!("v-{}", verse_key.replace(':', "-"))
}

/// Format a count with thousands separators (12345 -> "12,345")
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
