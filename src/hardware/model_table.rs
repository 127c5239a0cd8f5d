//! Apple hardware identifier table
//!
//! Identifiers look like `iPad7,6`: a family (`iPad7`) and a minor revision
//! (`6`). Each rule covers one family and an inclusive range of minors.

use std::ops::RangeInclusive;

pub struct ModelRule {
    pub family: &'static str,
    pub minors: RangeInclusive<u32>,
    pub name: &'static str,
}

const fn rule(family: &'static str, minors: RangeInclusive<u32>, name: &'static str) -> ModelRule {
    ModelRule {
        family,
        minors,
        name,
    }
}

pub static MODEL_RULES: &[ModelRule] = &[
    // iPad
    rule("iPad1", 1..=1, "iPad"),
    rule("iPad2", 1..=4, "iPad 2"),
    rule("iPad2", 5..=7, "iPad mini"),
    rule("iPad3", 1..=3, "iPad 3"),
    rule("iPad3", 4..=6, "iPad 4"),
    rule("iPad4", 1..=3, "iPad Air"),
    rule("iPad4", 4..=6, "iPad mini 2"),
    rule("iPad4", 7..=9, "iPad mini 3"),
    rule("iPad5", 1..=2, "iPad mini 4"),
    rule("iPad5", 3..=4, "iPad Air 2"),
    rule("iPad6", 3..=4, "iPad Pro (9.7 Inch)"),
    rule("iPad6", 7..=8, "iPad Pro (12.9 Inch)"),
    rule("iPad6", 11..=12, "iPad 5"),
    rule("iPad7", 1..=2, "iPad Pro 2 (12.9 Inch)"),
    rule("iPad7", 3..=4, "iPad Pro (10.5 Inch)"),
    rule("iPad7", 5..=6, "iPad 6"),
    rule("iPad7", 11..=12, "iPad 7"),
    rule("iPad8", 1..=4, "iPad Pro (11 Inch)"),
    rule("iPad8", 5..=8, "iPad Pro 3 (12.9 Inch)"),
    rule("iPad8", 9..=10, "iPad Pro 2 (11 Inch)"),
    rule("iPad8", 11..=12, "iPad Pro 4 (12.9 Inch)"),
    rule("iPad11", 1..=2, "iPad mini 5"),
    rule("iPad11", 3..=4, "iPad Air 3"),
    rule("iPad11", 6..=7, "iPad 8"),
    rule("iPad12", 1..=2, "iPad 9"),
    rule("iPad13", 1..=2, "iPad Air 4"),
    rule("iPad13", 4..=7, "iPad Pro 3 (11 Inch)"),
    rule("iPad13", 8..=11, "iPad Pro 5 (12.9 Inch)"),
    rule("iPad13", 16..=17, "iPad Air 5"),
    rule("iPad13", 18..=19, "iPad 10"),
    rule("iPad14", 1..=2, "iPad mini 6"),
    // iPhone
    rule("iPhone1", 1..=1, "iPhone"),
    rule("iPhone1", 2..=2, "iPhone 3G"),
    rule("iPhone2", 1..=1, "iPhone 3GS"),
    rule("iPhone3", 1..=3, "iPhone 4"),
    rule("iPhone4", 1..=1, "iPhone 4S"),
    rule("iPhone5", 1..=2, "iPhone 5"),
    rule("iPhone5", 3..=4, "iPhone 5c"),
    rule("iPhone6", 1..=2, "iPhone 5s"),
    rule("iPhone7", 1..=1, "iPhone 6 Plus"),
    rule("iPhone7", 2..=2, "iPhone 6"),
    rule("iPhone8", 1..=1, "iPhone 6s"),
    rule("iPhone8", 2..=2, "iPhone 6s Plus"),
    rule("iPhone8", 4..=4, "iPhone SE"),
    rule("iPhone9", 1..=1, "iPhone 7"),
    rule("iPhone9", 3..=3, "iPhone 7"),
    rule("iPhone9", 2..=2, "iPhone 7 Plus"),
    rule("iPhone9", 4..=4, "iPhone 7 Plus"),
    rule("iPhone10", 1..=1, "iPhone 8"),
    rule("iPhone10", 4..=4, "iPhone 8"),
    rule("iPhone10", 2..=2, "iPhone 8 Plus"),
    rule("iPhone10", 5..=5, "iPhone 8 Plus"),
    rule("iPhone10", 3..=3, "iPhone X"),
    rule("iPhone10", 6..=6, "iPhone X"),
    rule("iPhone11", 2..=2, "iPhone XS"),
    rule("iPhone11", 4..=4, "iPhone XS Max"),
    rule("iPhone11", 6..=6, "iPhone XS Max"),
    rule("iPhone11", 8..=8, "iPhone XR"),
    rule("iPhone12", 1..=1, "iPhone 11"),
    rule("iPhone12", 3..=3, "iPhone 11 Pro"),
    rule("iPhone12", 5..=5, "iPhone 11 Pro Max"),
    rule("iPhone12", 8..=8, "iPhone SE (2nd generation)"),
    rule("iPhone13", 1..=1, "iPhone 12 mini"),
    rule("iPhone13", 2..=2, "iPhone 12"),
    rule("iPhone13", 3..=3, "iPhone 12 Pro"),
    rule("iPhone13", 4..=4, "iPhone 12 Pro Max"),
    rule("iPhone14", 2..=2, "iPhone 13 Pro"),
    rule("iPhone14", 3..=3, "iPhone 13 Pro Max"),
    rule("iPhone14", 4..=4, "iPhone 13 mini"),
    rule("iPhone14", 5..=5, "iPhone 13"),
    rule("iPhone14", 6..=6, "iPhone SE (3rd generation)"),
    rule("iPhone14", 7..=7, "iPhone 14"),
    rule("iPhone14", 8..=8, "iPhone 14 Plus"),
    rule("iPhone15", 2..=2, "iPhone 14 Pro"),
    rule("iPhone15", 3..=3, "iPhone 14 Pro Max"),
    rule("iPhone15", 4..=4, "iPhone 15"),
    rule("iPhone15", 5..=5, "iPhone 15 Plus"),
    rule("iPhone16", 1..=1, "iPhone 15 Pro"),
    rule("iPhone16", 2..=2, "iPhone 15 Pro Max"),
    // iPod
    rule("iPod1", 1..=1, "iPod touch"),
    rule("iPod2", 1..=1, "iPod touch 2"),
    rule("iPod3", 1..=1, "iPod touch 3"),
    rule("iPod4", 1..=1, "iPod touch 4"),
    rule("iPod5", 1..=1, "iPod touch 5"),
    rule("iPod7", 1..=1, "iPod touch 6"),
    rule("iPod9", 1..=1, "iPod touch 7"),
    // Apple TV
    rule("AppleTV2", 1..=1, "Apple TV 2"),
    rule("AppleTV3", 1..=2, "Apple TV 3"),
    rule("AppleTV5", 3..=3, "Apple TV HD"),
    rule("AppleTV6", 2..=2, "Apple TV 4K"),
    rule("AppleTV11", 1..=1, "Apple TV 4K (2nd generation)"),
];

/// Marketing name for a hardware identifier, if the table knows it
pub fn lookup(identifier: &str) -> Option<&'static str> {
    let (family, minor) = identifier.trim().split_once(',')?;
    let minor: u32 = minor.parse().ok()?;

    MODEL_RULES
        .iter()
        .find(|rule| rule.family == family && rule.minors.contains(&minor))
        .map(|rule| rule.name)
}
