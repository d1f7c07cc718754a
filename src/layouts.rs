use crate::error::KfResult;
use crate::geometry::Layout;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum KnownLayout {
    #[strum(to_string = "QWERTY")]
    Qwerty,
    // https://en.wikipedia.org/wiki/Dvorak_keyboard_layout
    #[strum(to_string = "Dvorak")]
    Dvorak,
    #[strum(to_string = "Dvorak (Programmer)")]
    DvorakProgrammer,
    // https://colemakmods.github.io/mod-dh/
    #[strum(to_string = "Colemak Mod-DH")]
    ColemakDH,
    #[strum(to_string = "Colemak Mod-DHk")]
    ColemakDHk,
    #[strum(to_string = "Colemak")]
    Colemak,
    // https://github.com/kaievns/halmak
    #[strum(to_string = "Halmak")]
    Halmak,
    #[strum(to_string = "Workman")]
    Workman,
    #[strum(to_string = "Norman")]
    Norman,
    // http://mkweb.bcgsc.ca/carpalx/
    #[strum(to_string = "Carpalx (QFMLWY)")]
    Carpalx,
    // https://github.com/apsu/canary
    #[strum(to_string = "Canary")]
    Canary,
}

impl KnownLayout {
    // Rows are concatenated top, home, bottom.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjkl;zxcvbnm,./",
            Self::Dvorak => "',.pyfgcrlaoeuidhtns;qjkxbmwvz",
            Self::DvorakProgrammer => ";,.pyfgcrlaoeuidhtns'qjkxbmwvz",
            Self::ColemakDH => "qwfpbjluy;arstgmneiozxcdvkh,./",
            Self::ColemakDHk => "qwfpbjluy;arstgkneiozxcdvmh,./",
            Self::Colemak => "qwfpgjluy;arstdhneiozxcvbkm,./",
            Self::Halmak => "wlrbz;qudjshnt,.aeoifmvc/gpxky",
            Self::Workman => "qdrwbjfup;ashtgyneoizxmcvkl<>?",
            Self::Norman => "qwdfkjurl;asetgyniohzxcvbpm,./",
            Self::Carpalx => "qfmlwyuobjdstnriaeh;zvgcxpk,./",
            Self::Canary => "wlypbzfou'crstgmneiaqjvdkxh/,.",
        }
    }

    pub fn layout(&self) -> KfResult<Layout> {
        Layout::parse(self.get_str())
    }
}

/// Every catalog entry as `(display name, layout)`, in declaration order.
pub fn get_all_layouts() -> KfResult<Vec<(String, Layout)>> {
    KnownLayout::iter()
        .map(|known| Ok((known.to_string(), known.layout()?)))
        .collect()
}
