//! Option lists for the select widgets
//!
//! Widgets re-render their selection from the stored value, so they need to
//! map a value back to its label.

/// One selectable option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

pub const DESTINATIONS: &[SelectOption] = &[
    opt("ny", "New York, USA"),
    opt("ldn", "London, UK"),
    opt("tky", "Tokyo, Japan"),
    opt("par", "Paris, France"),
    opt("rom", "Rome, Italy"),
    opt("ber", "Berlin, Germany"),
    opt("mad", "Madrid, Spain"),
    opt("syd", "Sydney, Australia"),
    opt("cpt", "Cape Town, South Africa"),
    opt("bkk", "Bangkok, Thailand"),
    opt("kyo", "Kyoto, Japan"),
    opt("ist", "Istanbul, Turkey"),
    opt("rio", "Rio de Janeiro, Brazil"),
    opt("mex", "Mexico City, Mexico"),
    opt("ams", "Amsterdam, Netherlands"),
    opt("ath", "Athens, Greece"),
    opt("bej", "Beijing, China"),
    opt("mos", "Moscow, Russia"),
    opt("mum", "Mumbai, India"),
    opt("cai", "Cairo, Egypt"),
];

pub const ROOM_TYPES: &[SelectOption] = &[
    opt("single", "Single"),
    opt("double", "Double"),
    opt("twin", "Twin"),
    opt("suite", "Suite"),
    opt("penthouse", "Penthouse"),
];

/// Options backing a select field, if it is one
pub fn options_for(field: &str) -> Option<&'static [SelectOption]> {
    match field {
        "destination" => Some(DESTINATIONS),
        "typeOfRoom" => Some(ROOM_TYPES),
        _ => None,
    }
}

/// Label of the option currently selected for `field`
pub fn label_for(field: &str, value: &str) -> Option<&'static str> {
    options_for(field)?
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
}

/// Star rating choices as shown in the rating select
pub fn star_label(stars: i64) -> String {
    if stars == 1 {
        "1 Star".to_string()
    } else {
        format!("{} Stars", stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_option_values_are_unique() {
        for options in [DESTINATIONS, ROOM_TYPES] {
            let values: HashSet<_> = options.iter().map(|o| o.value).collect();
            assert_eq!(values.len(), options.len());
        }
        assert_eq!(DESTINATIONS.len(), 20);
        assert_eq!(ROOM_TYPES.len(), 5);
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for("destination", "kyo"), Some("Kyoto, Japan"));
        assert_eq!(label_for("typeOfRoom", "twin"), Some("Twin"));
        assert_eq!(label_for("typeOfRoom", "castle"), None);
        assert_eq!(label_for("firstname", "Ada"), None);
    }

    #[test]
    fn test_star_label() {
        assert_eq!(star_label(1), "1 Star");
        assert_eq!(star_label(4), "4 Stars");
    }
}
