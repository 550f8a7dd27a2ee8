use crate::helpers::normalize_category;
use crate::types::Flag;

/// Device categories an engine reports, split into the ones that imply a
/// mobile device and the narrower set that implies a touch screen.
///
/// Entries are compared after [`normalize_category`], so write them
/// lowercase without separators.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CategoryTable {
    pub mobile: &'static [&'static str],
    pub touch: &'static [&'static str],
}

impl CategoryTable {
    /// `(is_mobile, is_touch)`. Categories outside the table stay `Unknown`,
    /// never `False`.
    pub fn flags(&self, category: Option<&str>) -> (Flag, Flag) {
        let Some(category) = category else {
            return (Flag::Unknown, Flag::Unknown);
        };
        let category = normalize_category(category);
        let hit = |set: &[&str]| {
            if set.contains(&category.as_str()) {
                Flag::True
            } else {
                Flag::Unknown
            }
        };
        (hit(self.mobile), hit(self.touch))
    }
}

/// Shared default: mobile, smartphone, mobile-phone, tablet, e-reader,
/// media-player, watch, camera are mobile; tablet, e-reader and smartphone
/// are touch.
pub(crate) const DEFAULT_CATEGORIES: CategoryTable = CategoryTable {
    mobile: &[
        "mobile",
        "smartphone",
        "mobilephone",
        "tablet",
        "ereader",
        "mediaplayer",
        "watch",
        "camera",
    ],
    touch: &["tablet", "ereader", "smartphone"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smartphone_is_mobile_and_touch() {
        assert_eq!(
            DEFAULT_CATEGORIES.flags(Some("smartphone")),
            (Flag::True, Flag::True)
        );
    }

    #[test]
    fn mobile_phone_is_not_known_touch() {
        assert_eq!(
            DEFAULT_CATEGORIES.flags(Some("Mobile-Phone")),
            (Flag::True, Flag::Unknown)
        );
    }

    #[test]
    fn unknown_category_stays_unknown() {
        assert_eq!(
            DEFAULT_CATEGORIES.flags(Some("desktop")),
            (Flag::Unknown, Flag::Unknown)
        );
        assert_eq!(DEFAULT_CATEGORIES.flags(None), (Flag::Unknown, Flag::Unknown));
    }
}
