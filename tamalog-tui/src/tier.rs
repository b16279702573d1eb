/// Growth stage of the mascot, picked from the number of logged entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    Tier6,
}

impl Tier {
    pub fn for_count(count: usize) -> Tier {
        match count {
            25.. => Tier::Tier6,
            20..=24 => Tier::Tier5,
            15..=19 => Tier::Tier4,
            10..=14 => Tier::Tier3,
            5..=9 => Tier::Tier2,
            _ => Tier::Tier1,
        }
    }

    pub fn image_id(self) -> &'static str {
        match self {
            Tier::Tier1 => "piyo01",
            Tier::Tier2 => "piyo02",
            Tier::Tier3 => "piyo03",
            Tier::Tier4 => "piyo04",
            Tier::Tier5 => "piyo05",
            Tier::Tier6 => "piyo06",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Tier::Tier1 => 1,
            Tier::Tier2 => 2,
            Tier::Tier3 => 3,
            Tier::Tier4 => 4,
            Tier::Tier5 => 5,
            Tier::Tier6 => 6,
        }
    }

    /// Terminal rendition of the tier image.
    pub fn art(self) -> &'static [&'static str] {
        match self {
            Tier::Tier1 => &["   ___   ", "  /   \\  ", " |  o  | ", "  \\___/  "],
            Tier::Tier2 => &["   ___   ", "  / ' \\  ", " | o>o | ", "  \\_^_/  "],
            Tier::Tier3 => &["   (\\_   ", "  ( o>   ", "  //\\    ", "  V_/_   "],
            Tier::Tier4 => &["   ,_,   ", "  (o>o)  ", "  /)_)   ", "   \"\"    "],
            Tier::Tier5 => &["  \\,_,/  ", "  (o>o)  ", " </)_)\\> ", "   \" \"   "],
            Tier::Tier6 => &[" * ,_, * ", "  (^>^)  ", " <//_)\\> ", "  _\" \"_  "],
        }
    }
}
