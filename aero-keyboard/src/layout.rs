//! Physical key layout of the lighting buffer
//!
//! The custom image holds one 4-byte record per slot, in the order below.
//! The order is fixed by the controller firmware: slot 1 is the first record
//! of the image, slot 128 the last. `None` marks a position with no LED.

/// Number of slots in the lighting buffer
pub const SLOT_COUNT: usize = 128;

/// Key names in slot order (index 0 = slot 1)
#[rustfmt::skip]
static SLOTS: [Option<&str>; SLOT_COUNT] = [
    None,           None,           None,           None,           None,           None,           // 1-6
    Some("lctrl"),  Some("lshift"), Some("caps"),   Some("tab"),    Some("`"),      Some("esc"),    // 7-12
    Some("fn"),     Some("iso"),    Some("a"),      Some("q"),      Some("1"),      Some("f1"),     // 13-18
    Some("gui"),    Some("z"),      Some("s"),      Some("w"),      Some("2"),      Some("f2"),     // 19-24
    Some("lalt"),   Some("x"),      Some("d"),      Some("e"),      Some("3"),      Some("f3"),     // 25-30
    None,           Some("c"),      Some("f"),      Some("r"),      Some("4"),      Some("f4"),     // 31-36
    None,           Some("v"),      Some("g"),      Some("t"),      Some("5"),      Some("f5"),     // 37-42
    Some("space"),  Some("b"),      Some("h"),      Some("y"),      Some("6"),      Some("f6"),     // 43-48
    None,           Some("n"),      Some("j"),      Some("u"),      Some("7"),      Some("f7"),     // 49-54
    None,           Some("m"),      Some("k"),      Some("i"),      Some("8"),      Some("f8"),     // 55-60
    Some("ralt"),   Some(","),      Some("l"),      Some("o"),      Some("9"),      Some("f9"),     // 61-66
    Some("app"),    Some("."),      Some(";"),      Some("p"),      Some("0"),      Some("f10"),    // 67-72
    Some("rctrl"),  Some("/"),      Some("'"),      Some("["),      Some("-"),      Some("f11"),    // 73-78
    None,           None,           None,           Some("]"),      Some("="),      Some("f12"),    // 79-84
    Some("left"),   Some("rshift"), Some("\\"),     None,           None,           Some("pause"),  // 85-90
    Some("down"),   Some("up"),     Some("enter"),  None,           Some("bksp"),   Some("del"),    // 91-96
    Some("right"),  Some("k1"),     Some("k4"),     Some("k7"),     Some("num"),    Some("home"),   // 97-102
    Some("k0"),     Some("k2"),     Some("k5"),     Some("k8"),     Some("k/"),     Some("pgup"),   // 103-108
    Some("k."),     Some("k3"),     Some("k6"),     Some("k9"),     Some("k*"),     Some("pgdn"),   // 109-114
    Some("kenter"), None,           Some("k+"),     None,           Some("k-"),     Some("end"),    // 115-120
    None,           None,           None,           None,           None,           None,           // 121-126
    None,           None,                                                                           // 127-128
];

/// All slots in buffer order
pub fn ordered_slots() -> &'static [Option<&'static str>; SLOT_COUNT] {
    &SLOTS
}

/// Key name at a 1-based slot (`None` for blank or out-of-range slots)
pub fn key_name(slot: usize) -> Option<&'static str> {
    slot.checked_sub(1)
        .and_then(|i| SLOTS.get(i))
        .copied()
        .flatten()
}

/// 1-based slot of a key name (exact match)
pub fn slot_of(name: &str) -> Option<usize> {
    SLOTS.iter().position(|&n| n == Some(name)).map(|i| i + 1)
}

/// Assigned key names in slot order
pub fn key_names() -> impl Iterator<Item = &'static str> {
    SLOTS.iter().filter_map(|&n| n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slot_count() {
        assert_eq!(ordered_slots().len(), 128);
    }

    #[test]
    fn test_known_positions() {
        assert_eq!(slot_of("lctrl"), Some(7));
        assert_eq!(slot_of("esc"), Some(12));
        assert_eq!(slot_of("a"), Some(15));
        assert_eq!(slot_of("space"), Some(43));
        assert_eq!(slot_of("\\"), Some(87));
        assert_eq!(slot_of("end"), Some(120));
    }

    #[test]
    fn test_blank_slots() {
        for slot in [1, 6, 31, 37, 49, 55, 79, 80, 81, 88, 89, 94, 116, 118, 121, 128] {
            assert_eq!(key_name(slot), None, "slot {slot} should be blank");
        }
        assert_eq!(key_name(0), None);
        assert_eq!(key_name(129), None);
    }

    #[test]
    fn test_key_name_inverts_slot_of() {
        for name in key_names() {
            let slot = slot_of(name).unwrap();
            assert_eq!(key_name(slot), Some(name));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = key_names().collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 102);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(slot_of("A"), None);
        assert_eq!(slot_of("Esc"), None);
    }
}
